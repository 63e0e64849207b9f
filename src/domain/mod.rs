//! Domain types: users, categories, tasks, templates.
//!
//! Entities carry their own ids (generated here, not by the database) and
//! unix-millisecond timestamps. JSON serialization is camelCase to match the
//! wire format consumers of this data expect.

mod category;
mod id;
mod priority;
mod status;
mod task;
mod template;
mod user;

pub use category::Category;
pub use id::generate_id;
pub use priority::Priority;
pub use status::TaskStatus;
pub use task::Task;
pub use template::{TaskBlueprint, Template};
pub use user::{Role, User};

/// Current time as unix milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
