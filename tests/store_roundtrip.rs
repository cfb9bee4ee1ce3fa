use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::tempdir;

use dayk::data::model::DayFeeling;
use dayk::data::model::GoalCategory;
use dayk::data::model::Priority;
use dayk::data::model::ReflectionDraft;
use dayk::data::planner::Planner;
use dayk::data::store;
use dayk::data::store::StoreError;

fn sample_planner() -> Planner {
	let mut planner = Planner::new();
	planner.add_agenda_item("08:00", "Gym", Priority::Low).unwrap();
	planner
		.add_agenda_item("09:00", "Standup", Priority::Medium)
		.unwrap();
	planner.add_note("Groceries", "Milk, eggs, café beans").unwrap();
	planner
		.add_goal("Marathon", "sub 4h", GoalCategory::Health, "2026-10-04")
		.unwrap();
	planner
		.save_reflection(
			NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
			&ReflectionDraft {
				day_feeling: Some(DayFeeling::Good),
				productivity: "Long run done".into(),
				gratitude: "Cool morning".into(),
				tomorrow: "Stretch".into(),
			},
		)
		.unwrap();
	planner
}

#[test]
fn save_then_load_round_trips() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("dayk.json");

	let mut planner = sample_planner();
	store::save_document(planner.document_mut(), &path).unwrap();

	let loaded = store::load_document(&path);
	assert_eq!(&loaded, planner.document());
}

#[test]
fn save_stamps_last_update() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("dayk.json");

	let mut planner = Planner::new();
	assert!(planner.document().last_update.is_none());
	store::save_document(planner.document_mut(), &path).unwrap();
	assert!(planner.document().last_update.is_some());
	assert!(store::load_document(&path).last_update.is_some());
}

#[test]
fn missing_file_loads_as_empty_document() {
	let doc = store::load_document(&PathBuf::from("/nonexistent/dayk.json"));
	assert!(doc.agenda_items.is_empty());
	assert!(doc.notes.is_empty());
	assert!(doc.goals.is_empty());
	assert!(doc.reflections.is_empty());
}

#[test]
fn corrupt_file_loads_as_empty_document() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("dayk.json");
	std::fs::write(&path, "{ not json").unwrap();

	let doc = store::load_document(&path);
	assert!(doc.agenda_items.is_empty());
	assert!(doc.notes.is_empty());
}

#[test]
fn import_defaults_absent_collections() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("partial.json");
	// A backup missing the goals field entirely
	std::fs::write(
		&path,
		r#"{
			"agendaItems": [{
				"id": 1, "time": "08:00", "task": "Gym", "priority": "low",
				"completed": false, "createdAt": "2026-08-06T07:00:00Z"
			}],
			"notes": [{
				"id": 2, "title": "t", "content": "c",
				"createdAt": "2026-08-06T07:00:00Z", "updatedAt": "2026-08-06T07:00:00Z"
			}],
			"reflections": {
				"2026-08-05": {
					"dayFeeling": "okay", "productivity": "packed",
					"timestamp": "2026-08-05T21:00:00Z"
				}
			}
		}"#,
	)
	.unwrap();

	let doc = store::import_document(&path).unwrap();
	assert_eq!(doc.agenda_items.len(), 1);
	assert_eq!(doc.notes.len(), 1);
	assert!(doc.goals.is_empty());
	assert_eq!(doc.reflections.len(), 1);
	assert_eq!(
		doc.reflections
			.get(&NaiveDate::from_ymd_opt(2026, 8, 5).unwrap())
			.unwrap()
			.productivity,
		"packed"
	);
}

#[test]
fn import_rejects_malformed_files() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("broken.json");
	std::fs::write(&path, "not even json").unwrap();

	assert!(matches!(
		store::import_document(&path),
		Err(StoreError::Parse { .. })
	));
	assert!(matches!(
		store::import_document(&dir.path().join("missing.json")),
		Err(StoreError::Read { .. })
	));
}

#[test]
fn export_writes_a_dated_pretty_backup() {
	let dir = tempdir().unwrap();
	let planner = sample_planner();

	let path = store::export_document(planner.document(), dir.path()).unwrap();
	let name = path.file_name().unwrap().to_str().unwrap();
	assert!(name.starts_with("dayk-backup-"));
	assert!(name.ends_with(".json"));

	let raw = std::fs::read_to_string(&path).unwrap();
	// Pretty-printed, with the export stamp alongside the document fields
	assert!(raw.contains('\n'));
	let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
	assert!(value.get("exportDate").is_some());
	assert!(value.get("agendaItems").is_some());
}

#[test]
fn exported_backups_can_be_imported_back() {
	let dir = tempdir().unwrap();
	let planner = sample_planner();

	let path = store::export_document(planner.document(), dir.path()).unwrap();
	let imported = store::import_document(&path).unwrap();
	assert_eq!(&imported, planner.document());
}
