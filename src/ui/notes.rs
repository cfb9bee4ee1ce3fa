use std::cell::RefCell;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::Frame;

use crate::data::model::ItemId;
use crate::data::model::Note;
use crate::style::MUTED_FG;
use crate::style::ROW_BG;
use crate::ui::clip;
use crate::ui::sanitize;
use crate::ui::toast::Severity;
use crate::ui::Session;
use crate::ui::FIELD_INPUT_STYLE;
use crate::ui::FIELD_LABEL_STYLE;
use crate::widgets::confirm::Confirm;
use crate::widgets::form::Form;
use crate::widgets::form::FormExt;
use crate::widgets::form::FormSignal;
use crate::widgets::label::Labeled;
use crate::widgets::text_input::TextInput;
use crate::widgets::widget::Component;
use crate::widgets::widget::ComponentRenderCtx;

/// Create or edit form; editing keeps the note's position in the list.
pub struct NoteForm {
	editing: Option<ItemId>,
	title: Labeled<'static, TextInput<'static>>,
	content: Labeled<'static, TextInput<'static>>,
	selected: usize,
}

impl NoteForm {
	fn new() -> Self {
		Self {
			editing: None,
			title: Labeled::new("Title".into(), TextInput::new().style(&FIELD_INPUT_STYLE))
				.style(&FIELD_LABEL_STYLE),
			content: Labeled::new("Content".into(), TextInput::new().style(&FIELD_INPUT_STYLE))
				.style(&FIELD_LABEL_STYLE),
			selected: 0,
		}
	}

	fn editing(note: &Note) -> Self {
		let mut form = Self::new();
		form.editing = Some(note.id);
		form.title.inner.set_input(note.title.clone());
		form.content.inner.set_input(note.content.clone());
		form
	}
}

impl Form for NoteForm {
	fn title(&self) -> String {
		if self.editing.is_some() {
			"Edit Note".into()
		} else {
			"New Note".into()
		}
	}

	fn component_count(&self) -> usize {
		2
	}

	fn component(&self, index: usize) -> Option<&dyn Component> {
		match index {
			0 => Some(&self.title),
			1 => Some(&self.content),
			_ => None,
		}
	}

	fn component_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
		match index {
			0 => Some(&mut self.title),
			1 => Some(&mut self.content),
			_ => None,
		}
	}

	fn selected(&self) -> usize {
		self.selected
	}

	fn set_selected(&mut self, selected: usize) {
		self.selected = selected;
	}
}

/// Free-form notes, newest first.
pub struct NotesPanel {
	cursor: usize,
	form: Option<NoteForm>,
	confirm: Option<(Confirm<'static>, ItemId)>,

	list_state: RefCell<ListState>,
}

impl NotesPanel {
	pub fn new() -> Self {
		Self {
			cursor: 0,
			form: None,
			confirm: None,
			list_state: RefCell::default(),
		}
	}

	pub fn open_form(&mut self) {
		if self.form.is_none() && self.confirm.is_none() {
			self.form = Some(NoteForm::new());
		}
	}

	pub fn close_forms(&mut self) {
		self.form = None;
		self.confirm = None;
	}

	pub fn has_form(&self) -> bool {
		self.form.is_some() || self.confirm.is_some()
	}

	fn move_cursor(&mut self, offset: i32, len: usize) {
		if len == 0 {
			self.cursor = 0;
			return;
		}
		if offset > 0 {
			self.cursor = (self.cursor + offset as usize).min(len - 1);
		} else {
			self.cursor = self.cursor.saturating_sub((-offset) as usize);
		}
	}

	pub fn input(&mut self, key: &KeyEvent, session: &mut Session) -> bool {
		if let Some((confirm, id)) = &mut self.confirm {
			confirm.input(key);
			if let Some(decision) = confirm.decision() {
				let id = *id;
				self.confirm = None;
				if decision {
					if session.planner.remove_note(id) {
						session.persist();
						session.notify("Note deleted", Severity::Success);
					} else {
						session.notify("That note no longer exists", Severity::Warning);
					}
				}
			}
			return true;
		}

		if let Some(form) = &mut self.form {
			match form.input_form(key) {
				Some(FormSignal::Submit) => {
					let title = form.title.inner.value();
					let content = form.content.inner.value();
					let result = match form.editing {
						Some(id) => session.planner.update_note(id, title, content),
						None => session.planner.add_note(title, content),
					};
					match result {
						Ok(_) => {
							let message = if form.editing.is_some() {
								"Note updated"
							} else {
								"Note created"
							};
							session.persist();
							session.notify(message, Severity::Success);
							self.form = None;
						}
						Err(err) => session.report(&err),
					}
				}
				Some(FormSignal::Exit) => self.form = None,
				None => {}
			}
			return true;
		}

		let len = session.planner.notes().len();
		match key.code {
			// Movement
			KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, len),
			KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, len),

			KeyCode::Char('e') | KeyCode::Enter => {
				if let Some(note) = session.planner.notes().get(self.cursor) {
					self.form = Some(NoteForm::editing(note));
				}
			}
			KeyCode::Char('d') | KeyCode::Delete => {
				if let Some(note) = session.planner.notes().get(self.cursor) {
					let prompt = format!("Delete '{}'?", clip(&sanitize(&note.title), 32));
					self.confirm = Some((Confirm::new("Confirm", prompt), note.id));
				}
			}
			KeyCode::Char('a') => self.open_form(),
			_ => return false,
		}
		true
	}

	pub fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
		let notes = session.planner.notes();
		let cursor = self.cursor.min(notes.len().saturating_sub(1));
		let rows = note_rows(notes, cursor, area.width);

		let mut list_state = self.list_state.borrow_mut();
		list_state.select((!notes.is_empty()).then_some(cursor));
		frame.render_stateful_widget(List::new(rows), area, &mut *list_state);

		if let Some(form) = &self.form {
			let mut ctx = ComponentRenderCtx {
				area,
				selected: true,
			};
			form.render_form(frame, &mut ctx);
		}
		if let Some((confirm, _)) = &self.confirm {
			let mut ctx = ComponentRenderCtx {
				area,
				selected: true,
			};
			confirm.render(frame, &mut ctx);
		}
	}
}

impl Default for NotesPanel {
	fn default() -> Self {
		Self::new()
	}
}

fn note_rows(notes: &[Note], cursor: usize, width: u16) -> Vec<ListItem<'static>> {
	if notes.is_empty() {
		return vec![ListItem::from(
			Line::from(" No notes yet.").italic().fg(MUTED_FG),
		)];
	}
	notes
		.iter()
		.enumerate()
		.map(|(idx, note)| format_note(note, idx == cursor, idx, width))
		.collect()
}

fn format_note(note: &Note, selected: bool, idx: usize, width: u16) -> ListItem<'static> {
	let bg = ROW_BG[if selected { 2 } else { idx % 2 }];
	let max = width.saturating_sub(4) as usize;

	let header = Line::from(vec![
		Span::styled(
			format!(" {}", clip(&sanitize(&note.title), max)),
			Style::default().bold(),
		),
		Span::styled(
			format!("  {}", note.created_at.format("%Y-%m-%d %H:%M")),
			Style::default().fg(MUTED_FG),
		),
	]);
	let body = Line::from(Span::raw(format!(
		"   {}",
		clip(&sanitize(&note.content), max)
	)));

	ListItem::from(vec![header, body]).bg(bg)
}

#[cfg(test)]
mod tests {
	use chrono::Utc;

	use super::note_rows;
	use crate::data::model::Note;

	#[test]
	fn empty_notes_render_placeholder() {
		assert_eq!(note_rows(&[], 0, 80).len(), 1);
	}

	#[test]
	fn one_row_per_note() {
		let now = Utc::now();
		let notes = vec![Note {
			id: 1,
			title: "Groceries".into(),
			content: "Milk, eggs".into(),
			created_at: now,
			updated_at: now,
		}];
		assert_eq!(note_rows(&notes, 0, 80).len(), 1);
	}
}
