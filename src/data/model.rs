use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Stable identifier for agenda items, notes and goals.
///
/// Allocated from a monotonic counter, never reused after deletion.
pub type ItemId = u64;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
	Low,
	#[default]
	Medium,
	High,
}

impl Priority {
	pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

	pub fn label(self) -> &'static str {
		match self {
			Priority::Low => "Low",
			Priority::Medium => "Medium",
			Priority::High => "High",
		}
	}
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
	#[default]
	Personal,
	Professional,
	Health,
	Learning,
	Financial,
}

impl GoalCategory {
	pub const ALL: [GoalCategory; 5] = [
		GoalCategory::Personal,
		GoalCategory::Professional,
		GoalCategory::Health,
		GoalCategory::Learning,
		GoalCategory::Financial,
	];

	pub fn label(self) -> &'static str {
		match self {
			GoalCategory::Personal => "Personal",
			GoalCategory::Professional => "Professional",
			GoalCategory::Health => "Health",
			GoalCategory::Learning => "Learning",
			GoalCategory::Financial => "Financial",
		}
	}
}

/// Fixed set of moods offered by the reflection form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayFeeling {
	Great,
	#[default]
	Good,
	Okay,
	Tired,
	Stressed,
}

impl DayFeeling {
	pub const ALL: [DayFeeling; 5] = [
		DayFeeling::Great,
		DayFeeling::Good,
		DayFeeling::Okay,
		DayFeeling::Tired,
		DayFeeling::Stressed,
	];

	pub fn label(self) -> &'static str {
		match self {
			DayFeeling::Great => "Great",
			DayFeeling::Good => "Good",
			DayFeeling::Okay => "Okay",
			DayFeeling::Tired => "Tired",
			DayFeeling::Stressed => "Stressed",
		}
	}
}

/// A time-stamped task for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaItem {
	pub id: ItemId,
	/// Zero-padded 24h "HH:MM"; lexical order equals chronological order
	pub time: String,
	pub task: String,
	pub priority: Priority,
	pub completed: bool,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
	pub id: ItemId,
	pub title: String,
	pub content: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
	pub id: ItemId,
	pub title: String,
	pub description: String,
	pub category: GoalCategory,
	/// Serialized as "" when unset, matching documents written by older builds
	#[serde(default, with = "empty_date")]
	pub deadline: Option<NaiveDate>,
	pub progress: u8,
	/// Always derived: true iff progress == 100
	pub completed: bool,
	pub created_at: DateTime<Utc>,
}

impl Goal {
	pub fn is_overdue(&self, today: NaiveDate) -> bool {
		match self.deadline {
			Some(deadline) => deadline < today && !self.completed,
			None => false,
		}
	}
}

/// One journal entry per calendar day; later saves overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
	pub day_feeling: DayFeeling,
	pub productivity: String,
	#[serde(default)]
	pub gratitude: String,
	#[serde(default)]
	pub tomorrow: String,
	pub timestamp: DateTime<Utc>,
}

/// Form payload for [`crate::data::planner::Planner::save_reflection`].
#[derive(Debug, Default, Clone)]
pub struct ReflectionDraft {
	pub day_feeling: Option<DayFeeling>,
	pub productivity: String,
	pub gratitude: String,
	pub tomorrow: String,
}

/// The sole unit of durability: all four collections serialized together.
///
/// Every field defaults so documents with absent collections load as empty
/// instead of failing.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
	pub agenda_items: Vec<AgendaItem>,
	pub notes: Vec<Note>,
	pub goals: Vec<Goal>,
	pub reflections: BTreeMap<NaiveDate, Reflection>,
	/// Written on every save, never read back
	pub last_update: Option<DateTime<Utc>>,
}

mod empty_date {
	use chrono::NaiveDate;
	use serde::Deserialize;
	use serde::Deserializer;
	use serde::Serializer;

	pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match value {
			Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
			None => serializer.serialize_str(""),
		}
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = Option::<String>::deserialize(deserializer)?;
		match raw.as_deref() {
			None | Some("") => Ok(None),
			Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
				.map(Some)
				.map_err(serde::de::Error::custom),
		}
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;
	use chrono::Utc;

	use super::DayFeeling;
	use super::Document;
	use super::Goal;
	use super::GoalCategory;
	use super::Priority;
	use super::Reflection;

	fn goal(deadline: Option<NaiveDate>) -> Goal {
		Goal {
			id: 1,
			title: "Read 12 books".into(),
			description: "One per month".into(),
			category: GoalCategory::Learning,
			deadline,
			progress: 25,
			completed: false,
			created_at: Utc::now(),
		}
	}

	#[test]
	fn priority_serializes_lowercase() {
		assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"medium\"");
		assert_eq!(serde_json::from_str::<Priority>("\"high\"").unwrap(), Priority::High);
	}

	#[test]
	fn goal_fields_use_camel_case() {
		let json = serde_json::to_value(goal(None)).unwrap();
		assert!(json.get("createdAt").is_some());
		assert!(json.get("created_at").is_none());
		assert_eq!(json["category"], "learning");
	}

	#[test]
	fn missing_deadline_reads_as_none() {
		let value = serde_json::to_value(goal(None)).unwrap();
		assert_eq!(value["deadline"], "");

		let parsed: Goal = serde_json::from_value(value).unwrap();
		assert_eq!(parsed.deadline, None);

		let json = r#"{
			"id": 2, "title": "t", "description": "d", "category": "health",
			"progress": 0, "completed": false,
			"createdAt": "2026-01-05T08:00:00Z"
		}"#;
		let parsed: Goal = serde_json::from_str(json).unwrap();
		assert_eq!(parsed.deadline, None);
	}

	#[test]
	fn deadline_round_trips_as_iso_date() {
		let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
		let value = serde_json::to_value(goal(Some(date))).unwrap();
		assert_eq!(value["deadline"], "2026-12-31");

		let parsed: Goal = serde_json::from_value(value).unwrap();
		assert_eq!(parsed.deadline, Some(date));
	}

	#[test]
	fn reflections_key_on_iso_dates() {
		let mut doc = Document::default();
		let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
		doc.reflections.insert(
			date,
			Reflection {
				day_feeling: DayFeeling::Good,
				productivity: "Shipped the report".into(),
				gratitude: String::new(),
				tomorrow: String::new(),
				timestamp: Utc::now(),
			},
		);

		let value = serde_json::to_value(&doc).unwrap();
		assert!(value["reflections"].get("2026-08-06").is_some());
	}

	#[test]
	fn document_with_absent_collections_loads_empty() {
		let doc: Document = serde_json::from_str("{}").unwrap();
		assert!(doc.agenda_items.is_empty());
		assert!(doc.notes.is_empty());
		assert!(doc.goals.is_empty());
		assert!(doc.reflections.is_empty());
		assert!(doc.last_update.is_none());
	}
}
