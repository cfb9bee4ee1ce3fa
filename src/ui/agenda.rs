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

use crate::data::model::AgendaItem;
use crate::data::model::ItemId;
use crate::data::model::Priority;
use crate::style::MUTED_FG;
use crate::style::PRIORITY_FG;
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
use crate::widgets::select::Select;
use crate::widgets::text_input::TextInput;
use crate::widgets::widget::Component;
use crate::widgets::widget::ComponentRenderCtx;

pub struct AgendaForm {
	time: Labeled<'static, TextInput<'static>>,
	task: Labeled<'static, TextInput<'static>>,
	priority: Labeled<'static, Select<'static>>,
	selected: usize,
}

impl AgendaForm {
	fn new() -> Self {
		Self {
			time: Labeled::new(
				"Time (HH:MM)".into(),
				TextInput::new().style(&FIELD_INPUT_STYLE),
			)
			.style(&FIELD_LABEL_STYLE),
			task: Labeled::new("Task".into(), TextInput::new().style(&FIELD_INPUT_STYLE))
				.style(&FIELD_LABEL_STYLE),
			priority: Labeled::new(
				"Priority".into(),
				Select::new(Priority::ALL.iter().copied().map(Priority::label).collect())
					.with_selected(1),
			)
			.style(&FIELD_LABEL_STYLE),
			selected: 0,
		}
	}

	fn priority(&self) -> Priority {
		Priority::ALL[self.priority.inner.selected()]
	}
}

impl Form for AgendaForm {
	fn title(&self) -> String {
		"New Agenda Item".into()
	}

	fn component_count(&self) -> usize {
		3
	}

	fn component(&self, index: usize) -> Option<&dyn Component> {
		match index {
			0 => Some(&self.time),
			1 => Some(&self.task),
			2 => Some(&self.priority),
			_ => None,
		}
	}

	fn component_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
		match index {
			0 => Some(&mut self.time),
			1 => Some(&mut self.task),
			2 => Some(&mut self.priority),
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

/// The day's schedule: a time-sorted task list plus its entry form.
pub struct AgendaPanel {
	cursor: usize,
	form: Option<AgendaForm>,
	confirm: Option<(Confirm<'static>, ItemId)>,

	list_state: RefCell<ListState>,
}

impl AgendaPanel {
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
			self.form = Some(AgendaForm::new());
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

	fn selected_id(&self, session: &Session) -> Option<ItemId> {
		session.planner.agenda().get(self.cursor).map(|item| item.id)
	}

	pub fn input(&mut self, key: &KeyEvent, session: &mut Session) -> bool {
		if let Some((confirm, id)) = &mut self.confirm {
			confirm.input(key);
			if let Some(decision) = confirm.decision() {
				let id = *id;
				self.confirm = None;
				if decision {
					if session.planner.remove_agenda_item(id) {
						session.persist();
						session.notify("Agenda item deleted", Severity::Success);
					} else {
						session.notify("That item no longer exists", Severity::Warning);
					}
				}
			}
			return true;
		}

		if let Some(form) = &mut self.form {
			match form.input_form(key) {
				Some(FormSignal::Submit) => {
					let result = session.planner.add_agenda_item(
						form.time.inner.value(),
						form.task.inner.value(),
						form.priority(),
					);
					match result {
						Ok(item) => {
							session.persist();
							session.notify(
								format!("Added {} to the agenda", item.time),
								Severity::Success,
							);
							self.form = None;
						}
						// Keep the form open so the input can be fixed
						Err(err) => session.report(&err),
					}
				}
				Some(FormSignal::Exit) => self.form = None,
				None => {}
			}
			return true;
		}

		let len = session.planner.agenda().len();
		match key.code {
			// Movement
			KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, len),
			KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, len),

			KeyCode::Enter | KeyCode::Char(' ') => {
				let Some(id) = self.selected_id(session) else {
					return true;
				};
				match session.planner.toggle_agenda_item(id) {
					Ok(completed) => {
						session.persist();
						let message = if completed { "Task completed" } else { "Task reopened" };
						session.notify(message, Severity::Success);
					}
					Err(err) => session.report(&err),
				}
			}
			KeyCode::Char('d') | KeyCode::Delete => {
				if let Some(item) = session.planner.agenda().get(self.cursor) {
					let prompt = format!("Delete '{}'?", clip(&sanitize(&item.task), 32));
					self.confirm = Some((Confirm::new("Confirm", prompt), item.id));
				}
			}
			KeyCode::Char('a') => self.open_form(),
			_ => return false,
		}
		true
	}

	pub fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
		let items = session.planner.agenda();
		let cursor = self.cursor.min(items.len().saturating_sub(1));
		let rows = agenda_rows(items, cursor);

		let mut list_state = self.list_state.borrow_mut();
		list_state.select((!items.is_empty()).then_some(cursor));
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

impl Default for AgendaPanel {
	fn default() -> Self {
		Self::new()
	}
}

fn agenda_rows(items: &[AgendaItem], cursor: usize) -> Vec<ListItem<'static>> {
	if items.is_empty() {
		return vec![ListItem::from(
			Line::from(" No agenda items for today.").italic().fg(MUTED_FG),
		)];
	}
	items
		.iter()
		.enumerate()
		.map(|(idx, item)| format_agenda_item(item, idx == cursor, idx))
		.collect()
}

fn format_agenda_item(item: &AgendaItem, selected: bool, idx: usize) -> ListItem<'static> {
	let bg = ROW_BG[if selected { 2 } else { idx % 2 }];
	let priority_fg = PRIORITY_FG[item.priority as usize];

	let task = sanitize(&item.task);
	let task_span = if item.completed {
		Span::from(task).crossed_out().fg(MUTED_FG)
	} else {
		Span::from(task)
	};
	let marker = if item.completed {
		Span::from(" ✓").fg(MUTED_FG)
	} else {
		Span::from("")
	};

	ListItem::from(Line::from(vec![
		Span::styled(format!(" {} ", item.time), Style::default().bold()),
		Span::styled("● ", Style::default().fg(priority_fg)),
		task_span,
		marker,
	]))
	.bg(bg)
}

#[cfg(test)]
mod tests {
	use chrono::Utc;

	use super::agenda_rows;
	use crate::data::model::AgendaItem;
	use crate::data::model::Priority;

	#[test]
	fn empty_agenda_renders_placeholder() {
		let rows = agenda_rows(&[], 0);
		assert_eq!(rows.len(), 1);
	}

	#[test]
	fn one_row_per_item() {
		let items = vec![
			AgendaItem {
				id: 1,
				time: "08:00".into(),
				task: "Gym".into(),
				priority: Priority::Low,
				completed: false,
				created_at: Utc::now(),
			},
			AgendaItem {
				id: 2,
				time: "09:00".into(),
				task: "Standup".into(),
				priority: Priority::Medium,
				completed: true,
				created_at: Utc::now(),
			},
		];
		assert_eq!(agenda_rows(&items, 0).len(), 2);
	}
}
