//! End-to-end template instantiation over a real store file

use chrono::NaiveDate;
use tempfile::TempDir;

use choreboard::domain::{Priority, TaskBlueprint, Template};
use choreboard::expand::{ExpandError, Expander, InstantiateOptions};
use choreboard::store::Store;
use choreboard::{seed, stats};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn open_store(dir: &TempDir) -> Store {
    Store::open(dir.path().join("choreboard.db")).expect("Failed to open store")
}

#[test]
fn morning_routine_gets_consecutive_due_dates() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    seed::seed(&mut store).unwrap();

    let templates = store.list_templates().unwrap();
    let morning = templates.iter().find(|t| t.name == "Morning Routine").unwrap();
    assert_eq!(morning.tasks.len(), 5);

    let options = InstantiateOptions {
        start_date: Some(date("2024-06-01")),
        ..Default::default()
    };
    let result = Expander::new(&mut store)
        .instantiate(&morning.id, &options, "user-1")
        .unwrap();

    assert_eq!(result.count, 5);
    let expected = ["2024-06-01", "2024-06-02", "2024-06-03", "2024-06-04", "2024-06-05"];
    for (task, want) in result.tasks.iter().zip(expected) {
        assert_eq!(task.due_date, Some(date(want)));
        assert!(task.depends_on.is_none());
    }
}

#[test]
fn weekly_cleaning_links_mop_to_vacuum() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    seed::seed(&mut store).unwrap();

    let templates = store.list_templates().unwrap();
    let cleaning = templates.iter().find(|t| t.name == "Weekly Cleaning").unwrap();

    let result = Expander::new(&mut store)
        .instantiate(&cleaning.id, &InstantiateOptions::default(), "user-1")
        .unwrap();

    // order=2 (Mop floors) depends on order=1 (Vacuum all rooms)
    let vacuum = &result.tasks[0];
    let mop = &result.tasks[1];
    assert_eq!(vacuum.title, "Vacuum all rooms");
    assert_eq!(mop.title, "Mop floors");
    assert_eq!(mop.depends_on.as_deref(), Some(vacuum.id.as_str()));

    // persisted form carries the link too
    let loaded = store.get_task(&mop.id).unwrap().unwrap();
    assert_eq!(loaded.depends_on.as_deref(), Some(vacuum.id.as_str()));
}

#[test]
fn no_start_date_means_no_due_dates() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    seed::seed(&mut store).unwrap();

    let templates = store.list_templates().unwrap();
    let id = templates[0].id.clone();
    let result = Expander::new(&mut store)
        .instantiate(&id, &InstantiateOptions::default(), "user-1")
        .unwrap();

    assert!(result.tasks.iter().all(|t| t.due_date.is_none()));
}

#[test]
fn nonexistent_template_fails_without_side_effects() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    let err = Expander::new(&mut store)
        .instantiate("nonexistent-id", &InstantiateOptions::default(), "user-1")
        .unwrap_err();

    assert!(matches!(err, ExpandError::TemplateNotFound(_)));
    assert!(store.list_tasks(&Default::default()).unwrap().is_empty());
}

#[test]
fn assignee_applies_to_whole_batch_and_shows_in_stats() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    let template = Template::new("Evening Routine", "Home")
        .with_task(TaskBlueprint::new("Tidy up", "Home", Priority::Medium, 10, 1))
        .with_task(TaskBlueprint::new("Lay out clothes", "Home", Priority::Low, 5, 2))
        .with_task(TaskBlueprint::new("Lights out", "Home", Priority::High, 5, 3));
    store.create_template(&template).unwrap();

    let options = InstantiateOptions {
        assigned_to: Some("kid-1".to_string()),
        start_date: Some(date("2024-06-10")),
    };
    let result = Expander::new(&mut store)
        .instantiate(&template.id, &options, "parent-1")
        .unwrap();

    assert!(result.tasks.iter().all(|t| t.assigned_to.as_deref() == Some("kid-1")));
    assert!(result.tasks.iter().all(|t| t.created_by == "parent-1"));

    let kid_stats = stats::task_stats(&store, Some("kid-1"), date("2024-06-10")).unwrap();
    assert_eq!(kid_stats.total, 3);
    assert_eq!(kid_stats.pending, 3);
    assert_eq!(kid_stats.due_today, 1);
}

#[test]
fn repeated_instantiation_is_not_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    seed::seed(&mut store).unwrap();

    let templates = store.list_templates().unwrap();
    let id = templates[0].id.clone();
    let n = templates[0].tasks.len();

    Expander::new(&mut store)
        .instantiate(&id, &InstantiateOptions::default(), "user-1")
        .unwrap();
    Expander::new(&mut store)
        .instantiate(&id, &InstantiateOptions::default(), "user-1")
        .unwrap();

    assert_eq!(store.list_tasks(&Default::default()).unwrap().len(), 2 * n);
}
