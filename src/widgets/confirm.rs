use std::sync::LazyLock;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::layout::Constraint;
use ratatui::layout::Flex;
use ratatui::layout::HorizontalAlignment;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::widgets::widget::Component;
use crate::widgets::widget::ComponentRenderCtx;

#[derive(Clone)]
pub struct ConfirmStyle<'s> {
	block: Block<'s>,
	buttons: [Style; 2],
	spacing: u16,
}

impl Default for ConfirmStyle<'_> {
	fn default() -> Self {
		Self {
			block: Block::bordered()
				.bg(Color::from_u32(0x1f1f1f))
				.title_alignment(HorizontalAlignment::Center),
			buttons: [
				Style::default().fg(Color::White),
				Style::default().bg(Color::White).fg(Color::Black).bold(),
			],
			spacing: 2,
		}
	}
}

static DEFAULT_STYLE: LazyLock<ConfirmStyle> = LazyLock::new(ConfirmStyle::default);

/// Modal yes/no question. Feed it keys until [`Confirm::decision`] is set.
pub struct Confirm<'s> {
	style: &'s ConfirmStyle<'s>,
	title: String,
	message: String,
	selected: usize,
	decision: Option<bool>,
}

impl Confirm<'_> {
	pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			style: &DEFAULT_STYLE,
			title: title.into(),
			message: message.into(),
			// Default to "No"
			selected: 1,
			decision: None,
		}
	}

	pub fn decision(&self) -> Option<bool> {
		self.decision
	}
}

impl Component for Confirm<'_> {
	fn input(&mut self, key: &KeyEvent) -> bool {
		match key.code {
			// Movement
			KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => self.selected = 1,
			KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => self.selected = 0,

			// Validate
			KeyCode::Char('y') => self.decision = Some(true),
			KeyCode::Char('n') => self.decision = Some(false),
			KeyCode::Enter => self.decision = Some(self.selected == 0),
			KeyCode::Esc => self.decision = Some(false),

			_ => return false,
		}
		true
	}

	fn render(&self, frame: &mut Frame, ctx: &mut ComponentRenderCtx) {
		let horizontal = Layout::horizontal([Constraint::Percentage(40)]).flex(Flex::Center);
		let [area] = horizontal.areas(ctx.area);

		let text_width = area.width.saturating_sub(4);
		let text_height = wrapped_line_count(&self.message, text_width);
		// Border + padding + empty line + buttons
		let vertical =
			Layout::vertical([Constraint::Length(text_height + 4)]).flex(Flex::Center);
		let [area] = vertical.areas(area);

		frame.render_widget(Clear, area);
		let block = self.style.block.clone().title(self.title.clone());
		let inner = block.inner(area);
		frame.render_widget(block, area);

		let text_area = Rect {
			x: inner.x + 1,
			y: inner.y,
			width: inner.width.saturating_sub(2),
			height: inner.height.saturating_sub(2),
		};
		frame.render_widget(
			Paragraph::new(self.message.as_str()).wrap(Wrap { trim: true }),
			text_area,
		);

		let style_yes = self.style.buttons[(self.selected == 0) as usize];
		let style_no = self.style.buttons[(self.selected == 1) as usize];
		let buttons = Line::from(vec![
			Span::styled("Y", style_yes.underlined()),
			Span::styled("es", style_yes),
			" ".repeat(self.style.spacing as usize).into(),
			Span::styled("N", style_no.underlined()),
			Span::styled("o", style_no),
		]);

		let button_width = buttons.width() as u16;
		let button_area = Rect {
			x: (text_area.x + text_area.width / 2).saturating_sub(button_width / 2),
			y: text_area.y + text_area.height + 1,
			width: button_width,
			height: 1,
		};
		frame.render_widget(&buttons, button_area);
	}

	fn height(&self) -> u16 {
		3
	}
}

fn wrapped_line_count(text: &str, width: u16) -> u16 {
	if width == 0 {
		return 1;
	}
	let mut lines = 1u16;
	let mut used = 0u16;
	for word in text.split_whitespace() {
		let w = (word.width() as u16).min(width);
		if used == 0 {
			used = w;
		} else if used + 1 + w <= width {
			used += 1 + w;
		} else {
			lines += 1;
			used = w;
		}
	}
	lines
}

#[cfg(test)]
mod tests {
	use super::wrapped_line_count;

	#[test]
	fn line_count_follows_word_wrap() {
		assert_eq!(wrapped_line_count("", 10), 1);
		assert_eq!(wrapped_line_count("short", 10), 1);
		assert_eq!(wrapped_line_count("one two three four", 8), 3);
	}
}
