use std::path::PathBuf;
use std::sync::LazyLock;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::data::planner::Planner;
use crate::data::planner::PlannerError;
use crate::data::store;
use crate::ui::toast::Severity;
use crate::ui::toast::Toasts;
use crate::widgets::form::Form;
use crate::widgets::label::LabelDisplay;
use crate::widgets::label::LabelStyle;
use crate::widgets::label::Labeled;
use crate::widgets::text_input::TextInput;
use crate::widgets::text_input::TextInputStyle;
use crate::widgets::widget::Component;

pub mod agenda;
pub mod goals;
pub mod notes;
pub mod reflection;
pub mod toast;

/// Everything a panel needs to act on a user event: the collections, the
/// file they mirror to, and the toast stack for feedback.
pub struct Session {
	pub planner: Planner,
	pub path: PathBuf,
	pub toasts: Toasts,
}

impl Session {
	pub fn open(path: PathBuf) -> Self {
		let planner = Planner::from_document(store::load_document(&path));
		Self {
			planner,
			path,
			toasts: Toasts::default(),
		}
	}

	/// Mirrors the full document to disk. A failed write keeps the in-memory
	/// state authoritative and tells the user.
	pub fn persist(&mut self) {
		if let Err(err) = store::save_document(self.planner.document_mut(), &self.path) {
			log::error!("{err}");
			self.toasts.push(
				"Saving failed, the most recent change may not have been saved",
				Severity::Error,
			);
		}
	}

	pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
		self.toasts.push(message, severity);
	}

	pub fn report(&mut self, err: &PlannerError) {
		let message = match err {
			PlannerError::Validation(message) => message.clone(),
			PlannerError::NotFound(_) => "That item no longer exists".into(),
		};
		self.toasts.push(message, Severity::Warning);
	}

	/// Writes a dated, pretty-printed backup next to the data file.
	pub fn export(&mut self) {
		let dir = self
			.path
			.parent()
			.filter(|dir| !dir.as_os_str().is_empty())
			.map(PathBuf::from)
			.unwrap_or_else(|| PathBuf::from("."));
		match store::export_document(self.planner.document(), &dir) {
			Ok(path) => self.notify(
				format!("Exported backup to {}", path.display()),
				Severity::Success,
			),
			Err(err) => {
				log::error!("{err}");
				self.notify("Export failed, see the log for details", Severity::Error);
			}
		}
	}
}

/// Replaces control characters so user text can never mangle the terminal.
pub fn sanitize(text: &str) -> String {
	text.chars()
		.map(|ch| if ch.is_control() { ' ' } else { ch })
		.collect()
}

/// Truncates to `max` display columns, appending an ellipsis when cut.
pub fn clip(text: &str, max: usize) -> String {
	if text.chars().count() <= max {
		return text.to_string();
	}
	let mut clipped: String = text.chars().take(max.saturating_sub(1)).collect();
	clipped.push('…');
	clipped
}

/// Field chrome shared by every data-entry form.
pub(crate) static FIELD_LABEL_STYLE: LazyLock<LabelStyle> = LazyLock::new(|| LabelStyle {
	display: LabelDisplay::Block {
		block: Box::new(Block::bordered()),
	},
	style: Some(Style::default().fg(Color::White)),
	style_selected: None,
});
pub(crate) static FIELD_INPUT_STYLE: LazyLock<TextInputStyle> = LazyLock::new(|| TextInputStyle {
	padding: [0, 0],
	markers: ["".into(), "".into()],
	style: Some(Style::default().fg(Color::White)),
	selected_style: None,
});

static PROMPT_LABEL_STYLE: LazyLock<LabelStyle> = LazyLock::new(|| LabelStyle {
	display: LabelDisplay::Newline,
	style: Some(Style::default().fg(Color::Gray)),
	style_selected: Some(Style::default().fg(Color::Cyan)),
});
static PROMPT_INPUT_STYLE: LazyLock<TextInputStyle> = LazyLock::new(|| TextInputStyle {
	padding: [0, 0],
	markers: ["> ".into(), "".into()],
	style: Some(Style::default().fg(Color::White)),
	selected_style: Some(Style::default().fg(Color::White)),
});

/// Path prompt for restoring a backup.
pub struct ImportPrompt {
	path: Labeled<'static, TextInput<'static>>,
}

impl ImportPrompt {
	pub fn new() -> Self {
		Self {
			path: Labeled::new(
				"Backup file to import".into(),
				TextInput::new().style(&PROMPT_INPUT_STYLE),
			)
			.style(&PROMPT_LABEL_STYLE),
		}
	}

	pub fn value(&self) -> &str {
		self.path.inner.value()
	}
}

impl Default for ImportPrompt {
	fn default() -> Self {
		Self::new()
	}
}

impl Form for ImportPrompt {
	fn title(&self) -> String {
		"Import".into()
	}

	fn component_count(&self) -> usize {
		1
	}

	fn component(&self, index: usize) -> Option<&dyn Component> {
		(index == 0).then_some(&self.path)
	}

	fn component_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
		(index == 0).then_some(&mut self.path)
	}

	fn selected(&self) -> usize {
		0
	}

	fn set_selected(&mut self, _selected: usize) {}
}

#[cfg(test)]
mod tests {
	use super::clip;
	use super::sanitize;

	#[test]
	fn sanitize_replaces_control_characters() {
		assert_eq!(sanitize("a\x1b[31mb"), "a [31mb");
		assert_eq!(sanitize("line\nbreak"), "line break");
		assert_eq!(sanitize("plain"), "plain");
	}

	#[test]
	fn clip_appends_ellipsis_only_when_needed() {
		assert_eq!(clip("short", 10), "short");
		assert_eq!(clip("0123456789", 5), "0123…");
	}
}
