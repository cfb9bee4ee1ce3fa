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
use ratatui::symbols::border::QUADRANT_OUTSIDE;
use ratatui::widgets::Block;
use ratatui::widgets::Clear;
use ratatui::Frame;

use crate::widgets::widget::Component;
use crate::widgets::widget::ComponentRenderCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSignal {
	/// Form dismissed; transient input is dropped
	Exit,
	/// Form submitted; read the fields and act
	Submit,
}

pub struct FormStyle {
	pub bg: Color,
}

impl Default for FormStyle {
	fn default() -> Self {
		Self {
			bg: Color::from_u32(0x2f2f2f),
		}
	}
}

/// A focus-cycling stack of labeled components.
pub trait Form {
	fn title(&self) -> String;

	fn component_count(&self) -> usize;
	fn component(&self, index: usize) -> Option<&dyn Component>;
	fn component_mut(&mut self, index: usize) -> Option<&mut dyn Component>;

	fn selected(&self) -> usize;
	fn set_selected(&mut self, selected: usize);

	fn form_style(&self) -> FormStyle {
		FormStyle::default()
	}
}

pub trait FormExt: Form {
	fn focus_next(&mut self) {
		let last = self.component_count().saturating_sub(1);
		self.set_selected((self.selected() + 1).min(last));
	}

	fn focus_prev(&mut self) {
		self.set_selected(self.selected().saturating_sub(1));
	}

	/// Routes a key to the focused component first, then to focus movement
	/// and submit/cancel.
	fn input_form(&mut self, key: &KeyEvent) -> Option<FormSignal> {
		let selected = self.selected();
		if let Some(component) = self.component_mut(selected) {
			if component.input(key) {
				return None;
			}
		}
		match key.code {
			KeyCode::Tab | KeyCode::Down => self.focus_next(),
			KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
			KeyCode::Enter => return Some(FormSignal::Submit),
			KeyCode::Esc => return Some(FormSignal::Exit),
			_ => {}
		}
		None
	}

	fn fields_height(&self) -> u16 {
		(0..self.component_count())
			.filter_map(|index| self.component(index))
			.map(|component| component.height())
			.sum()
	}

	/// Stacks the components vertically inside `ctx.area`.
	fn render_fields(&self, frame: &mut Frame, ctx: &mut ComponentRenderCtx) {
		let area = ctx.area;
		let mut y = area.y;
		for index in 0..self.component_count() {
			let Some(component) = self.component(index) else {
				continue;
			};
			let h = component.height();
			if y + h > area.y + area.height {
				break;
			}
			let mut child = ComponentRenderCtx {
				area: Rect {
					x: area.x,
					y,
					width: area.width,
					height: h,
				},
				selected: index == self.selected(),
			};
			component.render(frame, &mut child);
			y += h;
		}
	}

	/// Renders the form as a centered popup with border and title.
	fn render_form(&self, frame: &mut Frame, ctx: &mut ComponentRenderCtx) {
		let style = self.form_style();
		let height = self.fields_height() + 2;
		let horizontal = Layout::horizontal([Constraint::Percentage(40)]).flex(Flex::Center);
		let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
		let [area] = horizontal.areas(ctx.area);
		let [area] = vertical.areas(area);

		let block = Block::bordered()
			.border_set(QUADRANT_OUTSIDE)
			.title(self.title())
			.title_style(Style::default().fg(Color::White))
			.title_alignment(HorizontalAlignment::Center)
			.bg(style.bg)
			.fg(Color::from_u32(0x1a1a1f));
		frame.render_widget(Clear, area);
		let inner = block.inner(area);
		frame.render_widget(block, area);

		ctx.area = inner;
		self.render_fields(frame, ctx);
	}
}

impl<T: Form + ?Sized> FormExt for T {}
