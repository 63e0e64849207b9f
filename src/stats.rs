//! Dashboard statistics

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Priority, TaskStatus};
use crate::store::{Store, StoreResult};

/// Aggregated task counts for the dashboard
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Pending plus in-progress
    pub active: usize,
    /// Completed share of all tasks, as a rounded percentage (0 when empty)
    pub completion_rate: u32,
    /// Urgent priority and not yet completed
    pub urgent: usize,
    /// Due today and still open
    pub due_today: usize,
    /// Past due and still open
    pub overdue: usize,
    /// Task counts per category, sorted by category name
    pub by_category: Vec<CategoryCount>,
    /// Task counts per priority, most urgent first
    pub by_priority: Vec<PriorityCount>,
}

/// One row of the per-category breakdown
#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// One row of the per-priority breakdown
#[derive(Debug, Serialize)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

/// Compute stats over all tasks, or over tasks a user created or is assigned
pub fn task_stats(store: &Store, user_id: Option<&str>, today: NaiveDate) -> StoreResult<TaskStats> {
    let tasks = store.list_tasks_touching(user_id)?;

    let mut stats = TaskStats {
        total: tasks.len(),
        ..Default::default()
    };
    let mut by_category: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_priority: BTreeMap<Priority, usize> = BTreeMap::new();
    for task in &tasks {
        match task.status {
            TaskStatus::Pending => stats.pending += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
            TaskStatus::Completed => stats.completed += 1,
            TaskStatus::Cancelled => stats.cancelled += 1,
        }
        if task.priority == Priority::Urgent && task.status != TaskStatus::Completed {
            stats.urgent += 1;
        }
        if task.is_due_on(today) {
            stats.due_today += 1;
        }
        if task.is_overdue(today) {
            stats.overdue += 1;
        }
        *by_category.entry(task.category.as_str()).or_default() += 1;
        *by_priority.entry(task.priority).or_default() += 1;
    }

    stats.active = stats.pending + stats.in_progress;
    if stats.total > 0 {
        stats.completion_rate = ((stats.completed * 100) as f64 / stats.total as f64).round() as u32;
    }
    stats.by_category = by_category
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    stats.by_priority = by_priority
        .into_iter()
        .rev()
        .map(|(priority, count)| PriorityCount { priority, count })
        .collect();
    Ok(stats)
}
