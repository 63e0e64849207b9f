//! Entity ID generation
//!
//! All IDs use the format: `{6-char-hex}-{kind}-{slug}`
//! Example: `a3f19c-task-make-bed`
//!
//! The hex prefix comes from the random tail of a UUIDv7, not its timestamp
//! head: the leading bits of a v7 UUID only change every few hours, so two
//! entities with the same kind and title created close together would
//! otherwise collide.

/// Generate an entity ID from kind and title
pub fn generate_id(kind: &str, title: &str) -> String {
    let uuid = uuid::Uuid::now_v7().simple().to_string();
    let hex_prefix = &uuid[uuid.len() - 6..];
    format!("{}-{}-{}", hex_prefix, kind, slugify(title))
}

/// Slugify a title for use in IDs
fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c == '\'' || c == '\u{2019}' || c == '\u{2018}' {
                None // strip apostrophes rather than hyphenating them
            } else {
                Some('-')
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
