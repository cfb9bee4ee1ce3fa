use std::time::Duration;
use std::time::Instant;

use log::error;
use log::info;
use log::warn;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Clear;
use ratatui::Frame;

use crate::ui::sanitize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	Success,
	Warning,
	Error,
}

impl Severity {
	fn symbol(self) -> &'static str {
		match self {
			Severity::Success => "✓",
			Severity::Warning => "!",
			Severity::Error => "✗",
		}
	}

	fn style(self) -> Style {
		let bg = match self {
			Severity::Success => Color::from_u32(0x1d3b2a),
			Severity::Warning => Color::from_u32(0x4a3b12),
			Severity::Error => Color::from_u32(0x4a1a1a),
		};
		Style::default().fg(Color::White).bg(bg)
	}
}

#[derive(Debug)]
pub struct Toast {
	pub message: String,
	pub severity: Severity,
	expires_at: Instant,
}

/// Transient message stack. Each toast expires on its own clock; dismissing
/// one never touches the others, and identical messages are not coalesced.
#[derive(Debug, Default)]
pub struct Toasts {
	queue: Vec<Toast>,
}

impl Toasts {
	pub const LIFETIME: Duration = Duration::from_secs(5);
	const MAX_WIDTH: u16 = 44;

	pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
		self.push_at(message, severity, Instant::now());
	}

	pub fn push_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
		let message = message.into();
		match severity {
			Severity::Success => info!("{message}"),
			Severity::Warning => warn!("{message}"),
			Severity::Error => error!("{message}"),
		}
		self.queue.push(Toast {
			message,
			severity,
			expires_at: now + Self::LIFETIME,
		});
	}

	pub fn prune(&mut self) {
		self.prune_at(Instant::now());
	}

	pub fn prune_at(&mut self, now: Instant) {
		self.queue.retain(|toast| toast.expires_at > now);
	}

	pub fn dismiss_oldest(&mut self) {
		if !self.queue.is_empty() {
			self.queue.remove(0);
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = &Toast> {
		self.queue.iter()
	}

	pub fn len(&self) -> usize {
		self.queue.len()
	}

	pub fn is_empty(&self) -> bool {
		self.queue.is_empty()
	}

	/// Stacks the toasts in the top-right corner, newest at the bottom.
	pub fn render(&self, frame: &mut Frame) {
		let screen = frame.area();
		let mut y = screen.y + 1;
		for toast in &self.queue {
			if y >= screen.bottom() {
				break;
			}
			let text = sanitize(&toast.message);
			let line = Line::from(vec![
				Span::raw(format!(" {} ", toast.severity.symbol())),
				Span::raw(text),
				Span::raw(" "),
			])
			.style(toast.severity.style());

			let width = (line.width() as u16).min(Self::MAX_WIDTH).min(screen.width);
			let area = Rect {
				x: screen.right().saturating_sub(width + 1),
				y,
				width,
				height: 1,
			};
			frame.render_widget(Clear, area);
			frame.render_widget(line, area);
			y += 1;
		}
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;
	use std::time::Instant;

	use super::Severity;
	use super::Toasts;

	#[test]
	fn toasts_expire_independently() {
		let mut toasts = Toasts::default();
		let start = Instant::now();
		toasts.push_at("first", Severity::Success, start);
		toasts.push_at("second", Severity::Warning, start + Duration::from_secs(3));

		toasts.prune_at(start + Duration::from_secs(6));
		assert_eq!(toasts.len(), 1);
		assert_eq!(toasts.iter().next().unwrap().message, "second");

		toasts.prune_at(start + Duration::from_secs(9));
		assert!(toasts.is_empty());
	}

	#[test]
	fn manual_dismiss_drops_only_the_oldest() {
		let mut toasts = Toasts::default();
		let start = Instant::now();
		toasts.push_at("a", Severity::Success, start);
		toasts.push_at("b", Severity::Error, start);

		toasts.dismiss_oldest();
		assert_eq!(toasts.len(), 1);
		assert_eq!(toasts.iter().next().unwrap().message, "b");
	}

	#[test]
	fn duplicates_are_not_coalesced() {
		let mut toasts = Toasts::default();
		let start = Instant::now();
		toasts.push_at("same", Severity::Success, start);
		toasts.push_at("same", Severity::Success, start);
		assert_eq!(toasts.len(), 2);
	}
}
