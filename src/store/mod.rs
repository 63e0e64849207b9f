//! Persistent storage
//!
//! SQLite-backed store for users, categories, templates, and tasks. The store
//! is a plain handle passed explicitly to whatever needs it; tests use
//! [`Store::open_in_memory`].

mod sqlite;

pub use sqlite::{Store, TaskFilter};

use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} already exists: {name}")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
