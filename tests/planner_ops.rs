use dayk::data::model::DayFeeling;
use dayk::data::model::Document;
use dayk::data::model::GoalCategory;
use dayk::data::model::Priority;
use dayk::data::model::ReflectionDraft;
use dayk::data::planner::Planner;
use dayk::data::planner::PlannerError;

use chrono::NaiveDate;

fn draft(feeling: Option<DayFeeling>, productivity: &str) -> ReflectionDraft {
	ReflectionDraft {
		day_feeling: feeling,
		productivity: productivity.into(),
		gratitude: String::new(),
		tomorrow: String::new(),
	}
}

#[test]
fn agenda_stays_sorted_by_time() {
	let mut planner = Planner::new();
	planner
		.add_agenda_item("09:00", "Standup", Priority::Medium)
		.unwrap();
	planner.add_agenda_item("08:00", "Gym", Priority::Low).unwrap();
	planner
		.add_agenda_item("12:30", "Lunch with Ana", Priority::Low)
		.unwrap();

	let times: Vec<&str> = planner.agenda().iter().map(|item| item.time.as_str()).collect();
	assert_eq!(times, vec!["08:00", "09:00", "12:30"]);
	assert_eq!(planner.agenda()[0].task, "Gym");
	assert_eq!(planner.agenda()[1].task, "Standup");
}

#[test]
fn equal_times_keep_insertion_order() {
	let mut planner = Planner::new();
	planner.add_agenda_item("10:00", "first", Priority::Low).unwrap();
	planner.add_agenda_item("10:00", "second", Priority::Low).unwrap();
	planner.add_agenda_item("09:00", "earlier", Priority::Low).unwrap();

	let tasks: Vec<&str> = planner.agenda().iter().map(|item| item.task.as_str()).collect();
	assert_eq!(tasks, vec!["earlier", "first", "second"]);
}

#[test]
fn agenda_times_are_normalized_and_validated() {
	let mut planner = Planner::new();
	let item = planner.add_agenda_item("9:05", "Coffee", Priority::Low).unwrap();
	assert_eq!(item.time, "09:05");

	assert!(matches!(
		planner.add_agenda_item("", "Coffee", Priority::Low),
		Err(PlannerError::Validation(_))
	));
	assert!(matches!(
		planner.add_agenda_item("25:61", "Coffee", Priority::Low),
		Err(PlannerError::Validation(_))
	));
	assert!(matches!(
		planner.add_agenda_item("10:00", "   ", Priority::Low),
		Err(PlannerError::Validation(_))
	));
	assert_eq!(planner.agenda().len(), 1);
}

#[test]
fn toggle_flips_completion_and_reports_unknown_ids() {
	let mut planner = Planner::new();
	let item = planner.add_agenda_item("07:30", "Run", Priority::High).unwrap();

	assert_eq!(planner.toggle_agenda_item(item.id), Ok(true));
	assert!(planner.find_agenda_item(item.id).unwrap().completed);
	assert_eq!(planner.toggle_agenda_item(item.id), Ok(false));
	assert!(!planner.find_agenda_item(item.id).unwrap().completed);

	assert_eq!(planner.toggle_agenda_item(999), Err(PlannerError::NotFound(999)));
}

#[test]
fn deleting_a_nonexistent_id_changes_nothing() {
	let mut planner = Planner::new();
	planner.add_agenda_item("08:00", "Gym", Priority::Low).unwrap();
	planner.add_note("a", "b").unwrap();
	planner.add_goal("g", "d", GoalCategory::Personal, "").unwrap();

	let before = planner.document().clone();
	assert!(!planner.remove_agenda_item(12345));
	assert!(!planner.remove_note(12345));
	assert!(!planner.remove_goal(12345));
	assert_eq!(planner.document(), &before);
}

#[test]
fn notes_are_newest_first_and_edits_keep_position() {
	let mut planner = Planner::new();
	let first = planner.add_note("First", "one").unwrap();
	let second = planner.add_note("Second", "two").unwrap();

	let titles: Vec<&str> = planner.notes().iter().map(|note| note.title.as_str()).collect();
	assert_eq!(titles, vec!["Second", "First"]);

	let updated = planner.update_note(first.id, "First, edited", "one!").unwrap();
	assert_eq!(updated.title, "First, edited");
	assert!(updated.updated_at >= updated.created_at);

	// Still in second position after the edit
	assert_eq!(planner.notes()[0].id, second.id);
	assert_eq!(planner.notes()[1].id, first.id);
}

#[test]
fn empty_note_fields_are_rejected_without_mutation() {
	let mut planner = Planner::new();
	planner.add_note("Keep", "me").unwrap();

	assert!(matches!(
		planner.add_note("", "x"),
		Err(PlannerError::Validation(_))
	));
	assert!(matches!(
		planner.add_note("x", "   "),
		Err(PlannerError::Validation(_))
	));
	assert_eq!(planner.notes().len(), 1);

	let id = planner.notes()[0].id;
	assert!(matches!(
		planner.update_note(id, "", "x"),
		Err(PlannerError::Validation(_))
	));
	assert_eq!(planner.notes()[0].title, "Keep");
}

#[test]
fn note_text_is_trimmed_on_save() {
	let mut planner = Planner::new();
	let note = planner.add_note("  Title  ", "  body  ").unwrap();
	assert_eq!(note.title, "Title");
	assert_eq!(note.content, "body");
}

#[test]
fn goal_progress_derives_completed() {
	let mut planner = Planner::new();
	let goal = planner
		.add_goal("Ship the release", "v2", GoalCategory::Professional, "")
		.unwrap();
	assert_eq!(goal.progress, 0);
	assert!(!goal.completed);

	let goal = planner.set_goal_progress(goal.id, 100).unwrap();
	assert!(goal.completed);

	let goal = planner.set_goal_progress(goal.id, 99).unwrap();
	assert!(!goal.completed);
	assert_eq!(goal.progress, 99);
}

#[test]
fn out_of_range_progress_is_rejected_without_mutation() {
	let mut planner = Planner::new();
	let goal = planner
		.add_goal("Save money", "emergency fund", GoalCategory::Financial, "")
		.unwrap();
	planner.set_goal_progress(goal.id, 100).unwrap();

	assert!(matches!(
		planner.set_goal_progress(goal.id, 150),
		Err(PlannerError::Validation(_))
	));
	assert!(matches!(
		planner.set_goal_progress(goal.id, -1),
		Err(PlannerError::Validation(_))
	));

	let goal = planner.find_goal(goal.id).unwrap();
	assert_eq!(goal.progress, 100);
	assert!(goal.completed);

	assert_eq!(
		planner.set_goal_progress(999, 50),
		Err(PlannerError::NotFound(999))
	);
}

#[test]
fn goal_deadline_accepts_iso_or_empty() {
	let mut planner = Planner::new();
	let goal = planner
		.add_goal("Marathon", "sub 4h", GoalCategory::Health, "2026-10-04")
		.unwrap();
	assert_eq!(goal.deadline, NaiveDate::from_ymd_opt(2026, 10, 4));

	let goal = planner
		.add_goal("Read more", "books", GoalCategory::Learning, "  ")
		.unwrap();
	assert_eq!(goal.deadline, None);

	assert!(matches!(
		planner.add_goal("x", "y", GoalCategory::Personal, "next month"),
		Err(PlannerError::Validation(_))
	));
	assert_eq!(planner.goals().len(), 2);
}

#[test]
fn reflection_overwrites_the_same_day() {
	let mut planner = Planner::new();
	let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

	for round in 0..3 {
		planner
			.save_reflection(date, &draft(Some(DayFeeling::Good), &format!("round {round}")))
			.unwrap();
	}

	assert_eq!(planner.reflections().len(), 1);
	assert_eq!(planner.reflection_for(date).unwrap().productivity, "round 2");
}

#[test]
fn reflection_requires_feeling_and_productivity() {
	let mut planner = Planner::new();
	let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

	assert!(matches!(
		planner.save_reflection(date, &draft(None, "worked")),
		Err(PlannerError::Validation(_))
	));
	assert!(matches!(
		planner.save_reflection(date, &draft(Some(DayFeeling::Tired), "   ")),
		Err(PlannerError::Validation(_))
	));
	assert!(planner.reflections().is_empty());

	let saved = planner
		.save_reflection(
			date,
			&ReflectionDraft {
				day_feeling: Some(DayFeeling::Great),
				productivity: "  Finished the draft  ".into(),
				gratitude: " sunny weather ".into(),
				tomorrow: String::new(),
			},
		)
		.unwrap();
	assert_eq!(saved.productivity, "Finished the draft");
	assert_eq!(saved.gratitude, "sunny weather");
	assert_eq!(saved.tomorrow, "");
}

#[test]
fn ids_are_unique_across_collections_and_never_reused() {
	let mut planner = Planner::new();
	let item = planner.add_agenda_item("08:00", "a", Priority::Low).unwrap();
	let note = planner.add_note("n", "c").unwrap();
	let goal = planner.add_goal("g", "d", GoalCategory::Personal, "").unwrap();
	assert!(item.id < note.id && note.id < goal.id);

	assert!(planner.remove_goal(goal.id));
	let next = planner.add_note("later", "x").unwrap();
	assert!(next.id > goal.id);
}

#[test]
fn loading_a_document_seeds_the_id_counter() {
	let mut planner = Planner::new();
	planner.add_agenda_item("08:00", "a", Priority::Low).unwrap();
	planner.add_note("n", "c").unwrap();
	let max_id = planner.notes()[0].id;

	let doc: Document = planner.document().clone();
	let mut reloaded = Planner::from_document(doc);
	let fresh = reloaded.add_note("new", "entry").unwrap();
	assert!(fresh.id > max_id);
}
