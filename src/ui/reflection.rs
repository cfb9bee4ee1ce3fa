use chrono::Local;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::Frame;

use crate::data::model::DayFeeling;
use crate::data::model::ReflectionDraft;
use crate::style::MUTED_FG;
use crate::ui::toast::Severity;
use crate::ui::Session;
use crate::ui::FIELD_INPUT_STYLE;
use crate::ui::FIELD_LABEL_STYLE;
use crate::widgets::form::Form;
use crate::widgets::form::FormExt;
use crate::widgets::form::FormSignal;
use crate::widgets::label::Labeled;
use crate::widgets::select::Select;
use crate::widgets::text_input::TextInput;
use crate::widgets::widget::Component;
use crate::widgets::widget::ComponentRenderCtx;

/// First option means "not picked yet"; saving requires a real choice.
const UNSET_FEELING: &str = "—";

/// Today's journal entry, edited in place. The same day is always one entry:
/// saving again overwrites.
pub struct ReflectionPanel {
	feeling: Labeled<'static, Select<'static>>,
	productivity: Labeled<'static, TextInput<'static>>,
	gratitude: Labeled<'static, TextInput<'static>>,
	tomorrow: Labeled<'static, TextInput<'static>>,
	selected: usize,
}

impl ReflectionPanel {
	pub fn new(session: &Session) -> Self {
		let mut options = vec![UNSET_FEELING];
		options.extend(DayFeeling::ALL.iter().copied().map(DayFeeling::label));
		let mut panel = Self {
			feeling: Labeled::new("How did your day feel?".into(), Select::new(options))
				.style(&FIELD_LABEL_STYLE),
			productivity: Labeled::new(
				"What did you get done?".into(),
				TextInput::new().style(&FIELD_INPUT_STYLE),
			)
			.style(&FIELD_LABEL_STYLE),
			gratitude: Labeled::new(
				"Grateful for (optional)".into(),
				TextInput::new().style(&FIELD_INPUT_STYLE),
			)
			.style(&FIELD_LABEL_STYLE),
			tomorrow: Labeled::new(
				"Tomorrow's focus (optional)".into(),
				TextInput::new().style(&FIELD_INPUT_STYLE),
			)
			.style(&FIELD_LABEL_STYLE),
			selected: 0,
		};
		panel.reload(session);
		panel
	}

	/// Pre-populates the form from today's saved entry, if any.
	pub fn reload(&mut self, session: &Session) {
		let today = Local::now().date_naive();
		match session.planner.reflection_for(today) {
			Some(reflection) => {
				let index = DayFeeling::ALL
					.iter()
					.position(|feeling| *feeling == reflection.day_feeling)
					.map_or(0, |index| index + 1);
				self.feeling.inner.set_selected(index);
				self.productivity.inner.set_input(reflection.productivity.clone());
				self.gratitude.inner.set_input(reflection.gratitude.clone());
				self.tomorrow.inner.set_input(reflection.tomorrow.clone());
			}
			None => {
				self.feeling.inner.set_selected(0);
				self.productivity.inner.clear();
				self.gratitude.inner.clear();
				self.tomorrow.inner.clear();
			}
		}
	}

	fn draft(&self) -> ReflectionDraft {
		let index = self.feeling.inner.selected();
		ReflectionDraft {
			day_feeling: index.checked_sub(1).map(|index| DayFeeling::ALL[index]),
			productivity: self.productivity.inner.value().to_string(),
			gratitude: self.gratitude.inner.value().to_string(),
			tomorrow: self.tomorrow.inner.value().to_string(),
		}
	}

	/// Validates and saves today's entry, overwriting any earlier save.
	pub fn submit(&mut self, session: &mut Session) {
		let today = Local::now().date_naive();
		match session.planner.save_reflection(today, &self.draft()) {
			Ok(_) => {
				session.persist();
				session.notify("Reflection saved", Severity::Success);
			}
			Err(err) => session.report(&err),
		}
	}

	pub fn input(&mut self, key: &KeyEvent, session: &mut Session) -> bool {
		// Tab switches panels; fields cycle with Up/Down
		if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
			return false;
		}
		match self.input_form(key) {
			Some(FormSignal::Submit) => self.submit(session),
			Some(FormSignal::Exit) | None => {}
		}
		true
	}

	pub fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
		let today = Local::now().date_naive();
		let saved = session.planner.reflection_for(today);

		let mut header = vec![Span::styled(
			format!(" Daily reflection · {today}"),
			Style::default().bold(),
		)];
		if let Some(reflection) = saved {
			header.push(Span::styled(
				format!(
					"  saved {}",
					reflection.timestamp.with_timezone(&Local).format("%H:%M"),
				),
				Style::default().fg(MUTED_FG).italic(),
			));
		}
		let mut header_area = area;
		header_area.height = 1;
		frame.render_widget(Line::from(header), header_area);

		let mut ctx = ComponentRenderCtx {
			area: Rect {
				x: area.x,
				y: area.y + 2,
				width: area.width,
				height: area.height.saturating_sub(2),
			},
			selected: true,
		};
		self.render_fields(frame, &mut ctx);
	}
}

impl Form for ReflectionPanel {
	fn title(&self) -> String {
		"Daily Reflection".into()
	}

	fn component_count(&self) -> usize {
		4
	}

	fn component(&self, index: usize) -> Option<&dyn Component> {
		match index {
			0 => Some(&self.feeling),
			1 => Some(&self.productivity),
			2 => Some(&self.gratitude),
			3 => Some(&self.tomorrow),
			_ => None,
		}
	}

	fn component_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
		match index {
			0 => Some(&mut self.feeling),
			1 => Some(&mut self.productivity),
			2 => Some(&mut self.gratitude),
			3 => Some(&mut self.tomorrow),
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
