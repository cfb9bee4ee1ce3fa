use std::sync::LazyLock;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::style::Styled;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::Frame;

use crate::widgets::widget::Component;
use crate::widgets::widget::ComponentRenderCtx;

#[derive(Debug, Clone)]
pub struct SelectStyle {
	pub style: Option<Style>,
	pub selected_style: Option<Style>,
	pub value_style: Style,
}

impl Default for SelectStyle {
	fn default() -> Self {
		Self {
			style: Default::default(),
			selected_style: Default::default(),
			value_style: Style::default().fg(Color::Cyan),
		}
	}
}

impl SelectStyle {
	pub fn style(&self) -> Style {
		self.style.unwrap_or_default()
	}

	pub fn style_selected(&self) -> Style {
		match self.selected_style {
			Some(style) => style,
			None => Style::default().fg(Color::Yellow),
		}
	}
}

static DEFAULT_STYLE: LazyLock<SelectStyle> = LazyLock::new(SelectStyle::default);

/// Picker over a fixed set of labels: `◂ Medium ▸`.
pub struct Select<'s> {
	options: Vec<&'static str>,
	selected: usize,

	style: &'s SelectStyle,
}

impl<'s> Select<'s> {
	pub fn new(options: Vec<&'static str>) -> Self {
		Self {
			options,
			selected: 0,
			style: &DEFAULT_STYLE,
		}
	}

	pub fn with_selected(mut self, selected: usize) -> Self {
		self.set_selected(selected);
		self
	}

	pub fn style(mut self, style: &'s SelectStyle) -> Self {
		self.style = style;
		self
	}

	pub fn selected(&self) -> usize {
		self.selected
	}

	pub fn set_selected(&mut self, selected: usize) {
		self.selected = selected.min(self.options.len().saturating_sub(1));
	}

	fn cycle(&mut self, offset: i32) {
		if self.options.is_empty() {
			return;
		}
		let len = self.options.len() as i32;
		self.selected = (self.selected as i32 + offset).rem_euclid(len) as usize;
	}
}

impl Component for Select<'_> {
	fn input(&mut self, key: &KeyEvent) -> bool {
		match key.code {
			KeyCode::Left | KeyCode::Char('h') => self.cycle(-1),
			KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => self.cycle(1),
			_ => return false,
		}
		true
	}

	fn render(&self, frame: &mut Frame, ctx: &mut ComponentRenderCtx) {
		let style = if ctx.selected {
			self.style.style_selected()
		} else {
			self.style.style()
		};
		let label = self.options.get(self.selected).copied().unwrap_or("");
		let widest = self.options.iter().map(|o| o.len()).max().unwrap_or(0);

		let draw = Line::from(vec![
			Span::raw("◂ "),
			Span::styled(format!("{label:<widest$}"), self.style.value_style),
			Span::raw(" ▸"),
		])
		.set_style(style);
		frame.render_widget(draw, ctx.area);
	}

	fn height(&self) -> u16 {
		1
	}
}

#[cfg(test)]
mod tests {
	use crossterm::event::KeyCode;
	use crossterm::event::KeyEvent;

	use super::Component;
	use super::Select;

	#[test]
	fn cycling_wraps_both_ways() {
		let mut select = Select::new(vec!["Low", "Medium", "High"]).with_selected(1);
		select.input(&KeyEvent::from(KeyCode::Right));
		assert_eq!(select.selected(), 2);
		select.input(&KeyEvent::from(KeyCode::Right));
		assert_eq!(select.selected(), 0);
		select.input(&KeyEvent::from(KeyCode::Left));
		assert_eq!(select.selected(), 2);
	}
}
