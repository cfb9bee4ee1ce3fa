use std::cell::RefCell;
use std::sync::LazyLock;

use chrono::Local;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::Frame;

use crate::data::model::Goal;
use crate::data::model::GoalCategory;
use crate::data::model::ItemId;
use crate::style::MUTED_FG;
use crate::style::OVERDUE_FG;
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
use crate::widgets::label::LabelDisplay;
use crate::widgets::label::LabelStyle;
use crate::widgets::label::Labeled;
use crate::widgets::select::Select;
use crate::widgets::text_input::TextInput;
use crate::widgets::widget::Component;
use crate::widgets::widget::ComponentRenderCtx;

pub struct GoalForm {
	title: Labeled<'static, TextInput<'static>>,
	description: Labeled<'static, TextInput<'static>>,
	category: Labeled<'static, Select<'static>>,
	deadline: Labeled<'static, TextInput<'static>>,
	selected: usize,
}

impl GoalForm {
	fn new() -> Self {
		Self {
			title: Labeled::new("Title".into(), TextInput::new().style(&FIELD_INPUT_STYLE))
				.style(&FIELD_LABEL_STYLE),
			description: Labeled::new(
				"Description".into(),
				TextInput::new().style(&FIELD_INPUT_STYLE),
			)
			.style(&FIELD_LABEL_STYLE),
			category: Labeled::new(
				"Category".into(),
				Select::new(
					GoalCategory::ALL
						.iter()
						.copied()
						.map(GoalCategory::label)
						.collect(),
				),
			)
			.style(&FIELD_LABEL_STYLE),
			deadline: Labeled::new(
				"Deadline (YYYY-MM-DD, optional)".into(),
				TextInput::new().style(&FIELD_INPUT_STYLE),
			)
			.style(&FIELD_LABEL_STYLE),
			selected: 0,
		}
	}

	fn category(&self) -> GoalCategory {
		GoalCategory::ALL[self.category.inner.selected()]
	}
}

impl Form for GoalForm {
	fn title(&self) -> String {
		"New Goal".into()
	}

	fn component_count(&self) -> usize {
		4
	}

	fn component(&self, index: usize) -> Option<&dyn Component> {
		match index {
			0 => Some(&self.title),
			1 => Some(&self.description),
			2 => Some(&self.category),
			3 => Some(&self.deadline),
			_ => None,
		}
	}

	fn component_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
		match index {
			0 => Some(&mut self.title),
			1 => Some(&mut self.description),
			2 => Some(&mut self.category),
			3 => Some(&mut self.deadline),
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

static PROGRESS_LABEL_STYLE: LazyLock<LabelStyle> = LazyLock::new(|| LabelStyle {
	display: LabelDisplay::Inline { spacing: 1 },
	style: Some(Style::default().fg(Color::White)),
	style_selected: None,
});

/// Single-field prompt for a new progress percentage.
pub struct ProgressForm {
	goal_id: ItemId,
	value: Labeled<'static, TextInput<'static>>,
}

impl ProgressForm {
	fn new(goal: &Goal) -> Self {
		Self {
			goal_id: goal.id,
			value: Labeled::new(
				"Progress (0-100):".into(),
				TextInput::new()
					.with_input(goal.progress.to_string())
					.style(&FIELD_INPUT_STYLE),
			)
			.style(&PROGRESS_LABEL_STYLE),
		}
	}
}

impl Form for ProgressForm {
	fn title(&self) -> String {
		"Update Progress".into()
	}

	fn component_count(&self) -> usize {
		1
	}

	fn component(&self, index: usize) -> Option<&dyn Component> {
		(index == 0).then_some(&self.value)
	}

	fn component_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
		(index == 0).then_some(&mut self.value)
	}

	fn selected(&self) -> usize {
		0
	}

	fn set_selected(&mut self, _selected: usize) {}
}

/// Longer-horizon objectives with progress tracking.
pub struct GoalsPanel {
	cursor: usize,
	form: Option<GoalForm>,
	progress: Option<ProgressForm>,
	confirm: Option<(Confirm<'static>, ItemId)>,

	list_state: RefCell<ListState>,
}

impl GoalsPanel {
	pub fn new() -> Self {
		Self {
			cursor: 0,
			form: None,
			progress: None,
			confirm: None,
			list_state: RefCell::default(),
		}
	}

	pub fn open_form(&mut self) {
		if self.form.is_none() && self.progress.is_none() && self.confirm.is_none() {
			self.form = Some(GoalForm::new());
		}
	}

	pub fn close_forms(&mut self) {
		self.form = None;
		self.progress = None;
		self.confirm = None;
	}

	pub fn has_form(&self) -> bool {
		self.form.is_some() || self.progress.is_some() || self.confirm.is_some()
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
					if session.planner.remove_goal(id) {
						session.persist();
						session.notify("Goal deleted", Severity::Success);
					} else {
						session.notify("That goal no longer exists", Severity::Warning);
					}
				}
			}
			return true;
		}

		if let Some(progress) = &mut self.progress {
			match progress.input_form(key) {
				Some(FormSignal::Submit) => {
					let raw = progress.value.inner.value().trim().to_string();
					match raw.parse::<i64>() {
						Ok(value) => match session.planner.set_goal_progress(progress.goal_id, value) {
							Ok(goal) => {
								session.persist();
								let message = if goal.completed {
									"Goal completed".to_string()
								} else {
									format!("Progress updated to {}%", goal.progress)
								};
								session.notify(message, Severity::Success);
								self.progress = None;
							}
							Err(err) => session.report(&err),
						},
						Err(_) => session.notify(
							"Enter a whole number between 0 and 100",
							Severity::Warning,
						),
					}
				}
				Some(FormSignal::Exit) => self.progress = None,
				None => {}
			}
			return true;
		}

		if let Some(form) = &mut self.form {
			match form.input_form(key) {
				Some(FormSignal::Submit) => {
					let result = session.planner.add_goal(
						form.title.inner.value(),
						form.description.inner.value(),
						form.category(),
						form.deadline.inner.value(),
					);
					match result {
						Ok(_) => {
							session.persist();
							session.notify("Goal created", Severity::Success);
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

		let len = session.planner.goals().len();
		match key.code {
			// Movement
			KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, len),
			KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, len),

			KeyCode::Char('p') | KeyCode::Enter => {
				if let Some(goal) = session.planner.goals().get(self.cursor) {
					self.progress = Some(ProgressForm::new(goal));
				}
			}
			KeyCode::Char('d') | KeyCode::Delete => {
				if let Some(goal) = session.planner.goals().get(self.cursor) {
					let prompt = format!("Delete '{}'?", clip(&sanitize(&goal.title), 32));
					self.confirm = Some((Confirm::new("Confirm", prompt), goal.id));
				}
			}
			KeyCode::Char('a') => self.open_form(),
			_ => return false,
		}
		true
	}

	pub fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
		let goals = session.planner.goals();
		let cursor = self.cursor.min(goals.len().saturating_sub(1));
		let rows = goal_rows(goals, cursor, area.width);

		let mut list_state = self.list_state.borrow_mut();
		list_state.select((!goals.is_empty()).then_some(cursor));
		frame.render_stateful_widget(List::new(rows), area, &mut *list_state);

		if let Some(form) = &self.form {
			let mut ctx = ComponentRenderCtx {
				area,
				selected: true,
			};
			form.render_form(frame, &mut ctx);
		}
		if let Some(progress) = &self.progress {
			let mut ctx = ComponentRenderCtx {
				area,
				selected: true,
			};
			progress.render_form(frame, &mut ctx);
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

impl Default for GoalsPanel {
	fn default() -> Self {
		Self::new()
	}
}

const PROGRESS_BAR_WIDTH: usize = 20;

fn goal_rows(goals: &[Goal], cursor: usize, width: u16) -> Vec<ListItem<'static>> {
	if goals.is_empty() {
		return vec![ListItem::from(
			Line::from(" No goals yet.").italic().fg(MUTED_FG),
		)];
	}
	let today = Local::now().date_naive();
	goals
		.iter()
		.enumerate()
		.map(|(idx, goal)| format_goal(goal, idx == cursor, idx, width, today))
		.collect()
}

fn format_goal(
	goal: &Goal,
	selected: bool,
	idx: usize,
	width: u16,
	today: chrono::NaiveDate,
) -> ListItem<'static> {
	let bg = ROW_BG[if selected { 2 } else { idx % 2 }];
	let max = width.saturating_sub(4) as usize;

	let mut header = vec![
		Span::styled(
			format!(" {}", clip(&sanitize(&goal.title), max)),
			Style::default().bold(),
		),
		Span::styled(
			format!("  [{}]", goal.category.label()),
			Style::default().fg(MUTED_FG).italic(),
		),
	];
	if goal.completed {
		header.push(Span::from(" ✓").fg(Color::Green));
	}

	let body = Line::from(Span::raw(format!(
		"   {}",
		clip(&sanitize(&goal.description), max)
	)));

	let mut footer = vec![
		Span::raw("   "),
		Span::styled(
			progress_bar(goal.progress, PROGRESS_BAR_WIDTH),
			Style::default().fg(Color::Cyan),
		),
		Span::raw(format!(" {:>3}%", goal.progress)),
	];
	match goal.deadline {
		Some(deadline) if goal.is_overdue(today) => {
			footer.push(Span::styled(
				format!("  due {deadline} (overdue)"),
				Style::default().fg(OVERDUE_FG).bold(),
			));
		}
		Some(deadline) => {
			footer.push(Span::styled(
				format!("  due {deadline}"),
				Style::default().fg(MUTED_FG),
			));
		}
		None => {}
	}

	ListItem::from(vec![Line::from(header), body, Line::from(footer)]).bg(bg)
}

fn progress_bar(progress: u8, width: usize) -> String {
	let filled = width * progress as usize / 100;
	let mut bar = String::with_capacity(width);
	for _ in 0..filled {
		bar.push('█');
	}
	for _ in filled..width {
		bar.push('░');
	}
	bar
}

#[cfg(test)]
mod tests {
	use super::goal_rows;
	use super::progress_bar;

	#[test]
	fn progress_bar_fills_proportionally() {
		assert_eq!(progress_bar(0, 10), "░░░░░░░░░░");
		assert_eq!(progress_bar(50, 10), "█████░░░░░");
		assert_eq!(progress_bar(100, 10), "██████████");
	}

	#[test]
	fn empty_goals_render_placeholder() {
		assert_eq!(goal_rows(&[], 0, 80).len(), 1);
	}
}
