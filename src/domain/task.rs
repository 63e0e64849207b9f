//! Task entity
//!
//! Tasks are independent, mutable records from the moment of creation,
//! whether entered by hand or instantiated from a template.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::generate_id;
use super::now_ms;
use super::priority::Priority;
use super::status::TaskStatus;

/// A concrete task on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,

    /// Short title
    pub title: String,

    /// Longer description
    pub description: Option<String>,

    /// Category name
    pub category: String,

    /// Priority level
    pub priority: Priority,

    /// Reward points for completing the task
    pub points: u32,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// Calendar date the task is due
    pub due_date: Option<NaiveDate>,

    /// User the task is assigned to
    pub assigned_to: Option<String>,

    /// Task this one logically follows (informational, not enforced)
    pub depends_on: Option<String>,

    /// Template this task was instantiated from
    pub template_id: Option<String>,

    /// User who created the task
    pub created_by: String,

    /// Whether the task repeats (stored only; nothing re-triggers it)
    pub is_recurring: bool,

    /// Recurrence pattern, free-form (e.g. "weekly")
    pub recurring_pattern: Option<String>,

    /// Completion timestamp (unix milliseconds), set when status becomes Completed
    pub completed_at: Option<i64>,

    /// Creation timestamp (unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (unix milliseconds)
    pub updated_at: i64,
}

impl Task {
    /// Create a new task with a generated ID
    pub fn new(title: impl Into<String>, category: impl Into<String>, created_by: impl Into<String>) -> Self {
        let title = title.into();
        let now = now_ms();
        Self {
            id: generate_id("task", &title),
            title,
            description: None,
            category: category.into(),
            priority: Priority::default(),
            points: 0,
            status: TaskStatus::Pending,
            due_date: None,
            assigned_to: None,
            depends_on: None,
            template_id: None,
            created_by: created_by.into(),
            is_recurring: false,
            recurring_pattern: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the reward points
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Assign to a user
    pub fn assigned_to(mut self, user_id: impl Into<String>) -> Self {
        self.assigned_to = Some(user_id.into());
        self
    }

    /// Mark as recurring with a pattern
    pub fn recurring(mut self, pattern: impl Into<String>) -> Self {
        self.is_recurring = true;
        self.recurring_pattern = Some(pattern.into());
        self
    }

    /// Update the status; completing sets `completed_at`
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.completed_at = match status {
            TaskStatus::Completed => Some(now_ms()),
            _ => None,
        };
        self.updated_at = now_ms();
    }

    /// Bump the update timestamp after in-place field edits
    pub fn touch(&mut self) {
        self.updated_at = now_ms();
    }

    /// Whether the task is past due and still open
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status.is_open() && self.due_date.is_some_and(|due| due < today)
    }

    /// Whether the task is due on the given date and still open
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.status.is_open() && self.due_date == Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_task_new_defaults() {
        let task = Task::new("Make bed", "Home", "user-1");
        assert!(task.id.contains("-task-make-bed"));
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.points, 0);
        assert!(task.due_date.is_none());
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_task_builders() {
        let task = Task::new("Vacuum", "Home", "user-1")
            .with_description("All rooms")
            .with_priority(Priority::High)
            .with_points(30)
            .with_due_date(date("2024-06-01"))
            .assigned_to("user-2");

        assert_eq!(task.description.as_deref(), Some("All rooms"));
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.points, 30);
        assert_eq!(task.due_date, Some(date("2024-06-01")));
        assert_eq!(task.assigned_to.as_deref(), Some("user-2"));
    }

    #[test]
    fn test_task_complete_sets_timestamp() {
        let mut task = Task::new("Dishes", "Home", "user-1");
        task.set_status(TaskStatus::Completed);
        assert!(task.completed_at.is_some());

        // Reopening clears it
        task.set_status(TaskStatus::Pending);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_task_overdue() {
        let mut task = Task::new("Trash", "Home", "user-1").with_due_date(date("2024-06-01"));
        assert!(task.is_overdue(date("2024-06-02")));
        assert!(!task.is_overdue(date("2024-06-01")));
        assert!(task.is_due_on(date("2024-06-01")));

        task.set_status(TaskStatus::Completed);
        assert!(!task.is_overdue(date("2024-06-02")));
    }

    #[test]
    fn test_task_serde_camel_case() {
        let task = Task::new("Mop floors", "Home", "user-1").with_due_date(date("2024-06-03"));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueDate"], "2024-06-03");
        assert_eq!(json["createdBy"], "user-1");
        assert_eq!(json["status"], "PENDING");
    }
}
