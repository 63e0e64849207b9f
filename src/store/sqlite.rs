//! SQLite store implementation

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use crate::domain::{Category, Priority, Role, Task, TaskBlueprint, TaskStatus, Template, User};

use super::{StoreError, StoreResult};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id           TEXT PRIMARY KEY,
    username     TEXT NOT NULL UNIQUE,
    display_name TEXT,
    role         TEXT NOT NULL,
    created_at   INTEGER NOT NULL,
    updated_at   INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id    TEXT PRIMARY KEY,
    name  TEXT NOT NULL UNIQUE,
    icon  TEXT,
    color TEXT
);

CREATE TABLE IF NOT EXISTS templates (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    category    TEXT NOT NULL,
    icon        TEXT,
    is_system   INTEGER NOT NULL DEFAULT 0,
    created_at  INTEGER NOT NULL,
    updated_at  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS template_tasks (
    template_id      TEXT NOT NULL REFERENCES templates(id) ON DELETE CASCADE,
    title            TEXT NOT NULL,
    description      TEXT,
    category         TEXT NOT NULL,
    priority         TEXT NOT NULL,
    points           INTEGER NOT NULL,
    ord              INTEGER NOT NULL,
    depends_on_order INTEGER,
    PRIMARY KEY (template_id, ord)
);

CREATE TABLE IF NOT EXISTS tasks (
    id                TEXT PRIMARY KEY,
    title             TEXT NOT NULL,
    description       TEXT,
    category          TEXT NOT NULL,
    priority          TEXT NOT NULL,
    points            INTEGER NOT NULL,
    status            TEXT NOT NULL,
    due_date          TEXT,
    assigned_to       TEXT,
    depends_on        TEXT,
    template_id       TEXT,
    created_by        TEXT NOT NULL,
    is_recurring      INTEGER NOT NULL DEFAULT 0,
    recurring_pattern TEXT,
    completed_at      INTEGER,
    created_at        INTEGER NOT NULL,
    updated_at        INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
CREATE INDEX IF NOT EXISTS idx_tasks_assigned ON tasks(assigned_to);
CREATE INDEX IF NOT EXISTS idx_tasks_created ON tasks(created_by);
";

/// Filters for task listing; `None` means "any"
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
}

/// SQLite-backed store
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a store at the given database path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened store");
        Self::init(conn)
    }

    /// Open an in-memory store (tests)
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    // === Users ===

    /// Insert a new user; username must be unique
    pub fn create_user(&self, user: &User) -> StoreResult<()> {
        if self.find_user_by_username(&user.username)?.is_some() {
            return Err(StoreError::AlreadyExists {
                kind: "user",
                name: user.username.clone(),
            });
        }
        self.conn.execute(
            "INSERT INTO users (id, username, display_name, role, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.id,
                user.username,
                user.display_name,
                user.role.as_str(),
                user.created_at,
                user.updated_at
            ],
        )?;
        debug!(id = %user.id, username = %user.username, "created user");
        Ok(())
    }

    /// Get a user by id
    pub fn get_user(&self, id: &str) -> StoreResult<Option<User>> {
        let user = self
            .conn
            .query_row("SELECT * FROM users WHERE id = ?1", params![id], user_from_row)
            .optional()?;
        Ok(user)
    }

    /// Look a user up by username
    pub fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT * FROM users WHERE username = ?1",
                params![username],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// List all users ordered by username
    pub fn list_users(&self) -> StoreResult<Vec<User>> {
        let mut stmt = self.conn.prepare("SELECT * FROM users ORDER BY username ASC")?;
        let users = stmt.query_map([], user_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    // === Categories ===

    /// Insert a new category; name must be unique
    pub fn create_category(&self, category: &Category) -> StoreResult<()> {
        let exists: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM categories WHERE name = ?1",
                params![category.name],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(StoreError::AlreadyExists {
                kind: "category",
                name: category.name.clone(),
            });
        }
        self.conn.execute(
            "INSERT INTO categories (id, name, icon, color) VALUES (?1, ?2, ?3, ?4)",
            params![category.id, category.name, category.icon, category.color],
        )?;
        Ok(())
    }

    /// List all categories ordered by name
    pub fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut stmt = self.conn.prepare("SELECT id, name, icon, color FROM categories ORDER BY name ASC")?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get("id")?,
                    name: row.get("name")?,
                    icon: row.get("icon")?,
                    color: row.get("color")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    // === Templates ===

    /// Insert a template and its blueprints in one transaction
    pub fn create_template(&mut self, template: &Template) -> StoreResult<()> {
        template.validate().map_err(StoreError::InvalidTemplate)?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO templates (id, name, description, category, icon, is_system, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                template.id,
                template.name,
                template.description,
                template.category,
                template.icon,
                template.is_system,
                template.created_at,
                template.updated_at
            ],
        )?;
        for bp in &template.tasks {
            tx.execute(
                "INSERT INTO template_tasks (template_id, title, description, category, priority, points, ord, depends_on_order)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    template.id,
                    bp.title,
                    bp.description,
                    bp.category,
                    bp.priority.as_str(),
                    bp.points,
                    bp.order,
                    bp.depends_on_order
                ],
            )?;
        }
        tx.commit()?;
        debug!(id = %template.id, name = %template.name, tasks = template.tasks.len(), "created template");
        Ok(())
    }

    /// Get a template with its blueprints ordered ascending by position
    pub fn get_template(&self, id: &str) -> StoreResult<Option<Template>> {
        let template = self
            .conn
            .query_row("SELECT * FROM templates WHERE id = ?1", params![id], template_from_row)
            .optional()?;

        let Some(mut template) = template else {
            return Ok(None);
        };
        template.tasks = self.load_blueprints(&template.id)?;
        Ok(Some(template))
    }

    /// List all templates (with blueprints) ordered by name
    pub fn list_templates(&self) -> StoreResult<Vec<Template>> {
        let mut stmt = self.conn.prepare("SELECT * FROM templates ORDER BY name ASC")?;
        let mut templates = stmt.query_map([], template_from_row)?.collect::<Result<Vec<_>, _>>()?;
        for template in &mut templates {
            template.tasks = self.load_blueprints(&template.id)?;
        }
        Ok(templates)
    }

    fn load_blueprints(&self, template_id: &str) -> StoreResult<Vec<TaskBlueprint>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, description, category, priority, points, ord, depends_on_order
             FROM template_tasks WHERE template_id = ?1 ORDER BY ord ASC",
        )?;
        let blueprints = stmt
            .query_map(params![template_id], |row| {
                Ok(TaskBlueprint {
                    title: row.get("title")?,
                    description: row.get("description")?,
                    category: row.get("category")?,
                    priority: parse_column(row, "priority")?,
                    points: row.get("points")?,
                    order: row.get("ord")?,
                    depends_on_order: row.get("depends_on_order")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(blueprints)
    }

    // === Tasks ===

    /// Insert a single task
    pub fn create_task(&self, task: &Task) -> StoreResult<()> {
        insert_task(&self.conn, task)?;
        debug!(id = %task.id, title = %task.title, "created task");
        Ok(())
    }

    /// Insert a batch of tasks in one transaction; all rows land or none do
    pub fn create_tasks(&mut self, tasks: &[Task]) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        for task in tasks {
            insert_task(&tx, task)?;
        }
        tx.commit()?;
        debug!(count = tasks.len(), "created task batch");
        Ok(())
    }

    /// Get a task by id
    pub fn get_task(&self, id: &str) -> StoreResult<Option<Task>> {
        let task = self
            .conn
            .query_row("SELECT * FROM tasks WHERE id = ?1", params![id], task_from_row)
            .optional()?;
        Ok(task)
    }

    /// Overwrite an existing task
    pub fn update_task(&self, task: &Task) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET title = ?2, description = ?3, category = ?4, priority = ?5,
                points = ?6, status = ?7, due_date = ?8, assigned_to = ?9, depends_on = ?10,
                template_id = ?11, is_recurring = ?12, recurring_pattern = ?13,
                completed_at = ?14, updated_at = ?15
             WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.description,
                task.category,
                task.priority.as_str(),
                task.points,
                task.status.as_str(),
                task.due_date.map(|d| d.to_string()),
                task.assigned_to,
                task.depends_on,
                task.template_id,
                task.is_recurring,
                task.recurring_pattern,
                task.completed_at,
                task.updated_at
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: "task",
                id: task.id.clone(),
            });
        }
        Ok(())
    }

    /// Delete a task by id
    pub fn delete_task(&self, id: &str) -> StoreResult<()> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: "task",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// List tasks matching the filter, ordered by status, then priority
    /// descending, then due date (tasks without a due date last)
    pub fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            clauses.push("status = ?");
            values.push(status.as_str().to_string());
        }
        if let Some(category) = &filter.category {
            clauses.push("category = ?");
            values.push(category.clone());
        }
        if let Some(priority) = filter.priority {
            clauses.push("priority = ?");
            values.push(priority.as_str().to_string());
        }
        if let Some(assigned_to) = &filter.assigned_to {
            clauses.push("assigned_to = ?");
            values.push(assigned_to.clone());
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        let sql = format!(
            "SELECT * FROM tasks{}
             ORDER BY
               CASE status WHEN 'PENDING' THEN 0 WHEN 'IN_PROGRESS' THEN 1 WHEN 'COMPLETED' THEN 2 ELSE 3 END,
               CASE priority WHEN 'URGENT' THEN 0 WHEN 'HIGH' THEN 1 WHEN 'MEDIUM' THEN 2 ELSE 3 END,
               due_date IS NULL, due_date ASC",
            where_clause
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(rusqlite::params_from_iter(values), task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// List tasks a user created or is assigned to; `None` means all tasks
    pub fn list_tasks_touching(&self, user_id: Option<&str>) -> StoreResult<Vec<Task>> {
        match user_id {
            None => self.list_tasks(&TaskFilter::default()),
            Some(user_id) => {
                let mut stmt = self
                    .conn
                    .prepare("SELECT * FROM tasks WHERE created_by = ?1 OR assigned_to = ?1")?;
                let tasks = stmt
                    .query_map(params![user_id], task_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(tasks)
            }
        }
    }

    /// Whether any template exists (used to decide whether to seed)
    pub fn has_templates(&self) -> StoreResult<bool> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM templates", [], |row| row.get(0))?;
        Ok(count > 0)
    }
}

fn insert_task(conn: &Connection, task: &Task) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO tasks (id, title, description, category, priority, points, status,
            due_date, assigned_to, depends_on, template_id, created_by, is_recurring,
            recurring_pattern, completed_at, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            task.id,
            task.title,
            task.description,
            task.category,
            task.priority.as_str(),
            task.points,
            task.status.as_str(),
            task.due_date.map(|d| d.to_string()),
            task.assigned_to,
            task.depends_on,
            task.template_id,
            task.created_by,
            task.is_recurring,
            task.recurring_pattern,
            task.completed_at,
            task.created_at,
            task.updated_at
        ],
    )?;
    Ok(())
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        display_name: row.get("display_name")?,
        role: parse_column(row, "role")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn template_from_row(row: &Row<'_>) -> rusqlite::Result<Template> {
    Ok(Template {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        category: row.get("category")?,
        icon: row.get("icon")?,
        is_system: row.get("is_system")?,
        tasks: Vec::new(),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        category: row.get("category")?,
        priority: parse_column(row, "priority")?,
        points: row.get("points")?,
        status: parse_column(row, "status")?,
        due_date: parse_date(row, "due_date")?,
        assigned_to: row.get("assigned_to")?,
        depends_on: row.get("depends_on")?,
        template_id: row.get("template_id")?,
        created_by: row.get("created_by")?,
        is_recurring: row.get("is_recurring")?,
        recurring_pattern: row.get("recurring_pattern")?,
        completed_at: row.get("completed_at")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Parse a TEXT column through FromStr, surfacing bad stored values as
/// conversion failures rather than panics
fn parse_column<T>(row: &Row<'_>, column: &str) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let value: String = row.get(column)?;
    value
        .parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, e.into()))
}

fn parse_date(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<NaiveDate>> {
    let value: Option<String> = row.get(column)?;
    value
        .map(|v| {
            v.parse::<NaiveDate>()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
        })
        .transpose()
}
