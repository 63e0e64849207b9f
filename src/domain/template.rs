//! Templates and task blueprints
//!
//! A template is a named, reusable definition of an ordered set of task
//! blueprints (a routine, e.g. "Morning Routine"). Blueprints are never
//! persisted as tasks themselves; they are the pattern tasks are
//! instantiated from.

use serde::{Deserialize, Serialize};

use super::id::generate_id;
use super::now_ms;
use super::priority::Priority;

/// One step within a template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBlueprint {
    /// Title copied onto the instantiated task
    pub title: String,

    /// Description copied onto the instantiated task
    pub description: Option<String>,

    /// Category name
    pub category: String,

    /// Priority level
    pub priority: Priority,

    /// Reward points
    pub points: u32,

    /// 1-based position, unique within the template
    pub order: u32,

    /// Order value of another blueprint in the same template this step
    /// logically follows (informational linkage only)
    pub depends_on_order: Option<u32>,
}

impl TaskBlueprint {
    /// Create a blueprint at the given position
    pub fn new(title: impl Into<String>, category: impl Into<String>, priority: Priority, points: u32, order: u32) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: category.into(),
            priority,
            points,
            order,
            depends_on_order: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark this step as following another step's order value
    pub fn depends_on(mut self, order: u32) -> Self {
        self.depends_on_order = Some(order);
        self
    }
}

/// A named, ordered set of task blueprints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Unique identifier
    pub id: String,

    /// Template name (e.g. "Morning Routine")
    pub name: String,

    /// Longer description
    pub description: Option<String>,

    /// Category the template is filed under
    pub category: String,

    /// Emoji or icon hint for the UI
    pub icon: Option<String>,

    /// Whether this is a builtin (seeded) template
    pub is_system: bool,

    /// Blueprints sorted ascending by `order`
    pub tasks: Vec<TaskBlueprint>,

    /// Creation timestamp (unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (unix milliseconds)
    pub updated_at: i64,
}

impl Template {
    /// Create an empty template with a generated ID
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        let name = name.into();
        let now = now_ms();
        Self {
            id: generate_id("tmpl", &name),
            name,
            description: None,
            category: category.into(),
            icon: None,
            is_system: false,
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Mark as a builtin template
    pub fn system(mut self) -> Self {
        self.is_system = true;
        self
    }

    /// Add a blueprint, keeping the list sorted ascending by order
    pub fn with_task(mut self, blueprint: TaskBlueprint) -> Self {
        let pos = self.tasks.partition_point(|t| t.order <= blueprint.order);
        self.tasks.insert(pos, blueprint);
        self.updated_at = now_ms();
        self
    }

    /// Check the blueprint order invariant: positive, unique values
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for task in &self.tasks {
            if task.order == 0 {
                return Err(format!("blueprint '{}' has order 0; orders are 1-based", task.title));
            }
            if !seen.insert(task.order) {
                return Err(format!("duplicate blueprint order {} in template '{}'", task.order, self.name));
            }
        }
        Ok(())
    }
}
