//! Household members

use serde::{Deserialize, Serialize};

use super::id::generate_id;
use super::now_ms;

/// User role within the household
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Member => "MEMBER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "MEMBER" => Ok(Self::Member),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// A household member
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: String,

    /// Unique login name
    pub username: String,

    /// Name shown in the UI; falls back to username
    pub display_name: Option<String>,

    /// Role within the household
    pub role: Role,

    /// Creation timestamp (unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (unix milliseconds)
    pub updated_at: i64,
}

impl User {
    /// Create a new member with a generated ID
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        let now = now_ms();
        Self {
            id: generate_id("user", &username),
            username,
            display_name: None,
            role: Role::Member,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self.updated_at = now_ms();
        self
    }

    /// Set the role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self.updated_at = now_ms();
        self
    }

    /// Name to show in listings
    pub fn display(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new() {
        let user = User::new("emma");
        assert!(user.id.contains("-user-emma"));
        assert_eq!(user.role, Role::Member);
        assert_eq!(user.display(), "emma");
    }

    #[test]
    fn test_user_display_name() {
        let user = User::new("emma").with_display_name("Emma K").with_role(Role::Admin);
        assert_eq!(user.display(), "Emma K");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("owner".parse::<Role>().is_err());
    }
}
