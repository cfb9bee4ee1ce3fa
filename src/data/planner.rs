use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::Utc;
use thiserror::Error;

use crate::data::model::AgendaItem;
use crate::data::model::Document;
use crate::data::model::Goal;
use crate::data::model::GoalCategory;
use crate::data::model::ItemId;
use crate::data::model::Note;
use crate::data::model::Priority;
use crate::data::model::Reflection;
use crate::data::model::ReflectionDraft;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlannerError {
	/// Rejected input; the collection is left unchanged
	#[error("{0}")]
	Validation(String),
	/// Stale or deleted id; the collection is left unchanged
	#[error("no such item: {0}")]
	NotFound(ItemId),
}

/// Owns the four collections and the id counter.
///
/// All mutation goes through here; persistence and display only ever see the
/// document read-only.
pub struct Planner {
	doc: Document,
	next_id: ItemId,
}

impl Planner {
	pub fn new() -> Self {
		Self::from_document(Document::default())
	}

	/// Seeds the id counter past every id already in the document, so ids are
	/// never reused across restarts or imports.
	pub fn from_document(doc: Document) -> Self {
		let next_id = doc
			.agenda_items
			.iter()
			.map(|item| item.id)
			.chain(doc.notes.iter().map(|note| note.id))
			.chain(doc.goals.iter().map(|goal| goal.id))
			.max()
			.map_or(1, |id| id + 1);
		Self { doc, next_id }
	}

	/// Wholesale replacement, used by import.
	pub fn replace_document(&mut self, doc: Document) {
		*self = Self::from_document(doc);
	}

	pub fn document(&self) -> &Document {
		&self.doc
	}

	pub fn document_mut(&mut self) -> &mut Document {
		&mut self.doc
	}

	pub fn agenda(&self) -> &[AgendaItem] {
		&self.doc.agenda_items
	}

	pub fn notes(&self) -> &[Note] {
		&self.doc.notes
	}

	pub fn goals(&self) -> &[Goal] {
		&self.doc.goals
	}

	pub fn reflections(&self) -> &BTreeMap<NaiveDate, Reflection> {
		&self.doc.reflections
	}

	fn allocate_id(&mut self) -> ItemId {
		let id = self.next_id;
		self.next_id += 1;
		id
	}

	// === Agenda ===

	pub fn add_agenda_item(
		&mut self,
		time: &str,
		task: &str,
		priority: Priority,
	) -> Result<AgendaItem, PlannerError> {
		let time = normalize_time(time)?;
		let task = required(task, "task")?;
		let item = AgendaItem {
			id: self.allocate_id(),
			time,
			task,
			priority,
			completed: false,
			created_at: Utc::now(),
		};
		self.doc.agenda_items.push(item.clone());
		// Stable sort: equal times keep insertion order
		self.doc.agenda_items.sort_by(|a, b| a.time.cmp(&b.time));
		Ok(item)
	}

	pub fn find_agenda_item(&self, id: ItemId) -> Option<&AgendaItem> {
		self.doc.agenda_items.iter().find(|item| item.id == id)
	}

	/// Flips the completed flag; returns the new state.
	pub fn toggle_agenda_item(&mut self, id: ItemId) -> Result<bool, PlannerError> {
		let item = self
			.doc
			.agenda_items
			.iter_mut()
			.find(|item| item.id == id)
			.ok_or(PlannerError::NotFound(id))?;
		item.completed = !item.completed;
		Ok(item.completed)
	}

	pub fn remove_agenda_item(&mut self, id: ItemId) -> bool {
		let before = self.doc.agenda_items.len();
		self.doc.agenda_items.retain(|item| item.id != id);
		self.doc.agenda_items.len() != before
	}

	// === Notes ===

	pub fn add_note(&mut self, title: &str, content: &str) -> Result<Note, PlannerError> {
		let title = required(title, "title")?;
		let content = required(content, "content")?;
		let now = Utc::now();
		let note = Note {
			id: self.allocate_id(),
			title,
			content,
			created_at: now,
			updated_at: now,
		};
		// Newest first; edits never reorder
		self.doc.notes.insert(0, note.clone());
		Ok(note)
	}

	pub fn find_note(&self, id: ItemId) -> Option<&Note> {
		self.doc.notes.iter().find(|note| note.id == id)
	}

	pub fn update_note(
		&mut self,
		id: ItemId,
		title: &str,
		content: &str,
	) -> Result<Note, PlannerError> {
		let title = required(title, "title")?;
		let content = required(content, "content")?;
		let note = self
			.doc
			.notes
			.iter_mut()
			.find(|note| note.id == id)
			.ok_or(PlannerError::NotFound(id))?;
		note.title = title;
		note.content = content;
		note.updated_at = Utc::now();
		Ok(note.clone())
	}

	pub fn remove_note(&mut self, id: ItemId) -> bool {
		let before = self.doc.notes.len();
		self.doc.notes.retain(|note| note.id != id);
		self.doc.notes.len() != before
	}

	// === Goals ===

	pub fn add_goal(
		&mut self,
		title: &str,
		description: &str,
		category: GoalCategory,
		deadline: &str,
	) -> Result<Goal, PlannerError> {
		let title = required(title, "title")?;
		let description = required(description, "description")?;
		let deadline = parse_deadline(deadline)?;
		let goal = Goal {
			id: self.allocate_id(),
			title,
			description,
			category,
			deadline,
			progress: 0,
			completed: false,
			created_at: Utc::now(),
		};
		self.doc.goals.insert(0, goal.clone());
		Ok(goal)
	}

	pub fn find_goal(&self, id: ItemId) -> Option<&Goal> {
		self.doc.goals.iter().find(|goal| goal.id == id)
	}

	/// Sets progress and rederives `completed`. Values outside 0..=100 are
	/// rejected without touching the goal.
	pub fn set_goal_progress(&mut self, id: ItemId, value: i64) -> Result<Goal, PlannerError> {
		if !(0..=100).contains(&value) {
			return Err(PlannerError::Validation(format!(
				"progress must be between 0 and 100, got {value}"
			)));
		}
		let goal = self
			.doc
			.goals
			.iter_mut()
			.find(|goal| goal.id == id)
			.ok_or(PlannerError::NotFound(id))?;
		goal.progress = value as u8;
		goal.completed = goal.progress == 100;
		Ok(goal.clone())
	}

	pub fn remove_goal(&mut self, id: ItemId) -> bool {
		let before = self.doc.goals.len();
		self.doc.goals.retain(|goal| goal.id != id);
		self.doc.goals.len() != before
	}

	// === Reflections ===

	/// Saves the journal entry for `date`, overwriting any previous entry for
	/// the same day.
	pub fn save_reflection(
		&mut self,
		date: NaiveDate,
		draft: &ReflectionDraft,
	) -> Result<Reflection, PlannerError> {
		let day_feeling = draft.day_feeling.ok_or_else(|| {
			PlannerError::Validation("pick how your day felt".into())
		})?;
		let productivity = required(&draft.productivity, "productivity")?;
		let reflection = Reflection {
			day_feeling,
			productivity,
			gratitude: draft.gratitude.trim().to_string(),
			tomorrow: draft.tomorrow.trim().to_string(),
			timestamp: Utc::now(),
		};
		self.doc.reflections.insert(date, reflection.clone());
		Ok(reflection)
	}

	pub fn reflection_for(&self, date: NaiveDate) -> Option<&Reflection> {
		self.doc.reflections.get(&date)
	}
}

impl Default for Planner {
	fn default() -> Self {
		Self::new()
	}
}

fn required(value: &str, field: &'static str) -> Result<String, PlannerError> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return Err(PlannerError::Validation(format!("{field} cannot be empty")));
	}
	Ok(trimmed.to_string())
}

/// Accepts "H:MM"/"HH:MM" and returns the canonical zero-padded form, keeping
/// the lexical-sort invariant on the stored string.
fn normalize_time(value: &str) -> Result<String, PlannerError> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return Err(PlannerError::Validation("time cannot be empty".into()));
	}
	NaiveTime::parse_from_str(trimmed, "%H:%M")
		.map(|time| time.format("%H:%M").to_string())
		.map_err(|_| {
			PlannerError::Validation(format!("invalid time `{trimmed}`, expected HH:MM"))
		})
}

fn parse_deadline(value: &str) -> Result<Option<NaiveDate>, PlannerError> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return Ok(None);
	}
	NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
		.map(Some)
		.map_err(|_| {
			PlannerError::Validation(format!("invalid deadline `{trimmed}`, expected YYYY-MM-DD"))
		})
}

#[cfg(test)]
mod tests {
	use super::normalize_time;
	use super::parse_deadline;
	use super::PlannerError;

	#[test]
	fn normalize_time_zero_pads() {
		assert_eq!(normalize_time("9:05").unwrap(), "09:05");
		assert_eq!(normalize_time(" 23:59 ").unwrap(), "23:59");
	}

	#[test]
	fn normalize_time_rejects_garbage() {
		assert!(matches!(normalize_time("25:00"), Err(PlannerError::Validation(_))));
		assert!(matches!(normalize_time("soon"), Err(PlannerError::Validation(_))));
		assert!(matches!(normalize_time(""), Err(PlannerError::Validation(_))));
	}

	#[test]
	fn deadline_empty_is_none() {
		assert_eq!(parse_deadline("").unwrap(), None);
		assert_eq!(parse_deadline("  ").unwrap(), None);
		assert!(parse_deadline("2026-12-31").unwrap().is_some());
		assert!(matches!(parse_deadline("next week"), Err(PlannerError::Validation(_))));
	}
}
