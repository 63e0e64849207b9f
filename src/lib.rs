//! Choreboard - household task board with template-driven routines
//!
//! Users create and assign tasks to household members, organize them by
//! category, priority, and status, and instantiate multi-step routines from
//! predefined templates. The template expander is the core: it turns a
//! template's ordered, dependency-annotated blueprints into concrete task
//! records with computed due dates and resolved inter-task links.
//!
//! # Modules
//!
//! - [`domain`] - entities: users, categories, tasks, templates
//! - [`store`] - SQLite persistence
//! - [`expand`] - template instantiation engine
//! - [`stats`] - dashboard aggregation
//! - [`session`] - caller identity resolution
//! - [`seed`] - builtin categories and templates
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod expand;
pub mod seed;
pub mod session;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use config::{Config, DefaultsConfig, StorageConfig};
pub use domain::{Category, Priority, Role, Task, TaskBlueprint, TaskStatus, Template, User, now_ms};
pub use expand::{ExpandError, Expander, Instantiation, InstantiateOptions, plan_tasks};
pub use session::{Session, SessionError};
pub use stats::{TaskStats, task_stats};
pub use store::{Store, StoreError, StoreResult, TaskFilter};
