//! Task categories

use serde::{Deserialize, Serialize};

use super::id::generate_id;

/// A category tasks are grouped under
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: String,

    /// Unique category name
    pub name: String,

    /// Emoji or icon hint for the UI
    pub icon: Option<String>,

    /// Display color (hex)
    pub color: Option<String>,
}

impl Category {
    /// Create a new category with a generated ID
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: generate_id("cat", &name),
            name,
            icon: None,
            color: None,
        }
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_new() {
        let cat = Category::new("Home").with_icon("🏠").with_color("#4ade80");
        assert!(cat.id.contains("-cat-home"));
        assert_eq!(cat.name, "Home");
        assert_eq!(cat.icon.as_deref(), Some("🏠"));
    }
}
