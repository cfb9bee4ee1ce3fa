use std::cell::Cell;
use std::sync::LazyLock;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use ratatui::layout::Position;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::style::Styled;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::widgets::widget::Component;
use crate::widgets::widget::ComponentRenderCtx;

#[derive(Debug, Clone)]
pub struct TextInputStyle<'s> {
	/// |<padding0><marker0>Input<marker1><padding1>|
	pub padding: [u16; 2],
	pub markers: [Span<'s>; 2],
	/// Style override
	pub style: Option<Style>,
	/// Selected style override
	pub selected_style: Option<Style>,
}

impl Default for TextInputStyle<'_> {
	fn default() -> Self {
		Self {
			padding: Default::default(),
			markers: ["".into(), "".into()],
			style: Default::default(),
			selected_style: Default::default(),
		}
	}
}

impl TextInputStyle<'_> {
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

static DEFAULT_STYLE: LazyLock<TextInputStyle> = LazyLock::new(TextInputStyle::default);

/// Single-line editable text field. Cursor moves over graphemes, not bytes.
pub struct TextInput<'s> {
	input: String,
	/// Grapheme index of the cursor
	cursor: usize,
	/// First visible grapheme, adjusted during render
	scroll: Cell<usize>,

	style: &'s TextInputStyle<'s>,
}

impl<'s> TextInput<'s> {
	pub fn new() -> Self {
		Self {
			input: String::default(),
			cursor: 0,
			scroll: Cell::new(0),
			style: &DEFAULT_STYLE,
		}
	}

	pub fn with_input(mut self, input: impl Into<String>) -> Self {
		self.set_input(input);
		self
	}

	pub fn style(mut self, style: &'s TextInputStyle) -> Self {
		self.style = style;
		self
	}

	pub fn set_input(&mut self, input: impl Into<String>) {
		self.input = input.into();
		self.cursor = self.grapheme_count();
		self.scroll.set(0);
	}

	pub fn value(&self) -> &str {
		&self.input
	}

	pub fn clear(&mut self) {
		self.input.clear();
		self.cursor = 0;
		self.scroll.set(0);
	}

	/// Takes the buffer out, resetting the field.
	pub fn submit(&mut self) -> String {
		self.cursor = 0;
		self.scroll.set(0);
		std::mem::take(&mut self.input)
	}

	fn grapheme_count(&self) -> usize {
		self.input.graphemes(true).count()
	}

	/// Byte offset of the grapheme at `index`, or the end of the buffer.
	fn byte_index(&self, index: usize) -> usize {
		self.input
			.grapheme_indices(true)
			.nth(index)
			.map(|(offset, _)| offset)
			.unwrap_or(self.input.len())
	}

	fn enter_char(&mut self, ch: char) {
		let index = self.byte_index(self.cursor);
		self.input.insert(index, ch);
		self.cursor += 1;
	}

	fn delete_back(&mut self) {
		if self.cursor == 0 {
			return;
		}
		let start = self.byte_index(self.cursor - 1);
		let end = self.byte_index(self.cursor);
		self.input.replace_range(start..end, "");
		self.cursor -= 1;
	}

	fn delete_forward(&mut self) {
		if self.cursor >= self.grapheme_count() {
			return;
		}
		let start = self.byte_index(self.cursor);
		let end = self.byte_index(self.cursor + 1);
		self.input.replace_range(start..end, "");
	}

	/// Visible slice and cursor column for the given content width, keeping
	/// the cursor inside the window.
	fn window(&self, width: u16) -> (String, u16) {
		let graphemes: Vec<&str> = self.input.graphemes(true).collect();
		let mut scroll = self.scroll.get().min(graphemes.len());
		if self.cursor < scroll {
			scroll = self.cursor;
		}

		// Walk the scroll forward until the cursor column fits
		loop {
			let cursor_col: u16 = graphemes[scroll..self.cursor]
				.iter()
				.map(|g| g.width() as u16)
				.sum();
			if cursor_col < width || scroll >= self.cursor {
				break;
			}
			scroll += 1;
		}
		self.scroll.set(scroll);

		let mut visible = String::new();
		let mut used = 0u16;
		for grapheme in &graphemes[scroll..] {
			let w = grapheme.width() as u16;
			if used + w > width {
				break;
			}
			visible.push_str(grapheme);
			used += w;
		}
		let cursor_col = graphemes[scroll..self.cursor]
			.iter()
			.map(|g| g.width() as u16)
			.sum();
		(visible, cursor_col)
	}
}

impl Default for TextInput<'_> {
	fn default() -> Self {
		Self::new()
	}
}

impl Component for TextInput<'_> {
	fn input(&mut self, key: &KeyEvent) -> bool {
		let ctrl_pressed = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Backspace => self.delete_back(),
			KeyCode::Delete => self.delete_forward(),
			// Movement
			KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
			KeyCode::Char('b') if ctrl_pressed => self.cursor = self.cursor.saturating_sub(1),
			KeyCode::Right => self.cursor = (self.cursor + 1).min(self.grapheme_count()),
			KeyCode::Char('f') if ctrl_pressed => {
				self.cursor = (self.cursor + 1).min(self.grapheme_count())
			}
			KeyCode::Home => self.cursor = 0,
			KeyCode::Char('a') if ctrl_pressed => self.cursor = 0,
			KeyCode::End => self.cursor = self.grapheme_count(),
			KeyCode::Char('e') if ctrl_pressed => self.cursor = self.grapheme_count(),
			KeyCode::Char('u') if ctrl_pressed => self.clear(),
			KeyCode::Char(ch) if !ctrl_pressed => self.enter_char(ch),
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

		let chrome = self.style.padding[0]
			+ self.style.padding[1]
			+ self.style.markers[0].width() as u16
			+ self.style.markers[1].width() as u16;
		let content_width = ctx.area.width.saturating_sub(chrome);
		let (visible, cursor_col) = self.window(content_width);

		let spacer = content_width.saturating_sub(visible.as_str().width() as u16);
		let draw = Line::from(vec![
			Span::raw(" ".repeat(self.style.padding[0] as usize)),
			self.style.markers[0].clone(),
			Span::from(visible),
			Span::raw(" ".repeat(spacer as usize)),
			self.style.markers[1].clone(),
			Span::raw(" ".repeat(self.style.padding[1] as usize)),
		])
		.set_style(style);
		frame.render_widget(draw, ctx.area);

		if ctx.selected {
			frame.set_cursor_position(Position::new(
				ctx.area.x
					+ self.style.padding[0]
					+ self.style.markers[0].width() as u16
					+ cursor_col,
				ctx.area.y,
			));
		}
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
	use super::TextInput;

	fn type_str(input: &mut TextInput, text: &str) {
		for ch in text.chars() {
			input.input(&KeyEvent::from(KeyCode::Char(ch)));
		}
	}

	#[test]
	fn typing_and_submit() {
		let mut input = TextInput::new();
		type_str(&mut input, "Standup");
		assert_eq!(input.value(), "Standup");
		assert_eq!(input.submit(), "Standup");
		assert_eq!(input.value(), "");
	}

	#[test]
	fn backspace_removes_whole_grapheme() {
		let mut input = TextInput::new().with_input("café");
		input.input(&KeyEvent::from(KeyCode::Backspace));
		assert_eq!(input.value(), "caf");
	}

	#[test]
	fn insert_in_the_middle() {
		let mut input = TextInput::new().with_input("815");
		input.input(&KeyEvent::from(KeyCode::Left));
		input.input(&KeyEvent::from(KeyCode::Char(':')));
		assert_eq!(input.value(), "81:5");
	}
}
