//! Template instantiation engine
//!
//! Expands a template's ordered blueprints into concrete task records:
//! one pass in ascending blueprint order, computing each task's due date
//! from its order value and resolving `depends_on_order` references against
//! the tasks already created in the same pass. Planning is pure; persistence
//! happens afterwards in a single transaction, so a template either yields
//! its full batch of tasks or nothing.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{Task, TaskStatus, Template, now_ms};
use crate::store::{Store, StoreError};

/// Errors from template instantiation
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Options for one instantiation call
#[derive(Debug, Clone, Default)]
pub struct InstantiateOptions {
    /// User every produced task is assigned to. Not validated against the
    /// user directory here; resolving names to ids is the caller's job.
    pub assigned_to: Option<String>,

    /// Date the first step lands on. Absent means no task gets a due date.
    pub start_date: Option<NaiveDate>,
}

/// Result of one instantiation call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instantiation {
    /// Created tasks, in blueprint order
    pub tasks: Vec<Task>,

    /// Number of tasks created
    pub count: usize,
}

/// Plan the tasks a template expands to, without touching storage.
///
/// Blueprints are visited in the template's ascending order. The due date
/// offset anchors on each blueprint's `order` value (`start + order - 1`
/// days), so gaps in order values produce gaps in due dates. A
/// `depends_on_order` that points at a not-yet-created order value (forward
/// or dangling) resolves to no link; that is deliberate, not an error.
pub fn plan_tasks(template: &Template, options: &InstantiateOptions, created_by: &str) -> Vec<Task> {
    let mut planned = Vec::with_capacity(template.tasks.len());
    let mut id_by_order: HashMap<u32, String> = HashMap::new();
    let now = now_ms();

    for blueprint in &template.tasks {
        let due_date = options
            .start_date
            .and_then(|start| start.checked_add_days(Days::new(u64::from(blueprint.order.saturating_sub(1)))));

        let depends_on = blueprint
            .depends_on_order
            .and_then(|order| id_by_order.get(&order).cloned());

        let task = Task {
            id: crate::domain::generate_id("task", &blueprint.title),
            title: blueprint.title.clone(),
            description: blueprint.description.clone(),
            category: blueprint.category.clone(),
            priority: blueprint.priority,
            points: blueprint.points,
            status: TaskStatus::Pending,
            due_date,
            assigned_to: options.assigned_to.clone(),
            depends_on,
            template_id: Some(template.id.clone()),
            created_by: created_by.to_string(),
            is_recurring: false,
            recurring_pattern: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };

        id_by_order.insert(blueprint.order, task.id.clone());
        planned.push(task);
    }

    planned
}

/// Expands templates into persisted tasks
pub struct Expander<'a> {
    store: &'a mut Store,
}

impl<'a> Expander<'a> {
    /// Create an expander over the given store
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Instantiate a template: load it, plan its tasks, persist the batch
    /// atomically, and return the created tasks in blueprint order.
    ///
    /// Fails with [`ExpandError::TemplateNotFound`] before any write when the
    /// id does not resolve. A persistence failure mid-batch rolls the whole
    /// batch back.
    pub fn instantiate(
        &mut self,
        template_id: &str,
        options: &InstantiateOptions,
        caller_id: &str,
    ) -> Result<Instantiation, ExpandError> {
        let template = self
            .store
            .get_template(template_id)?
            .ok_or_else(|| ExpandError::TemplateNotFound(template_id.to_string()))?;

        let tasks = plan_tasks(&template, options, caller_id);
        self.store.create_tasks(&tasks)?;

        tracing::info!(
            template = %template.name,
            count = tasks.len(),
            assigned_to = options.assigned_to.as_deref().unwrap_or("-"),
            "instantiated template"
        );

        Ok(Instantiation {
            count: tasks.len(),
            tasks,
        })
    }
}
