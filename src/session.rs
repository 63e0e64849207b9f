//! Caller identity resolution
//!
//! Every mutating command runs as some household member. The acting user
//! comes from the `--as` flag or the `defaults.user` config key and is
//! resolved against the user directory here, at the boundary; the core
//! components only ever see an already-resolved user id.

use thiserror::Error;

use crate::domain::{Role, User};
use crate::store::{Store, StoreError};

/// Errors resolving the acting user
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no acting user: pass --as <username> or set defaults.user in the config")]
    Missing,

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The resolved caller identity
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub role: Role,
}

impl Session {
    fn from_user(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

/// Resolve the acting user from the `--as` flag, falling back to the config
/// default. Absence of both, or a username the directory does not know, is
/// an error.
pub fn resolve(store: &Store, flag: Option<&str>, config_default: Option<&str>) -> Result<Session, SessionError> {
    let username = flag.or(config_default).ok_or(SessionError::Missing)?;
    let user = store
        .find_user_by_username(username)?
        .ok_or_else(|| SessionError::UnknownUser(username.to_string()))?;
    Ok(Session::from_user(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_flag_wins_over_default() {
        let store = Store::open_in_memory().unwrap();
        store.create_user(&User::new("emma")).unwrap();
        store.create_user(&User::new("sam")).unwrap();

        let session = resolve(&store, Some("sam"), Some("emma")).unwrap();
        assert_eq!(session.username, "sam");
    }

    #[test]
    fn test_resolve_falls_back_to_config() {
        let store = Store::open_in_memory().unwrap();
        store.create_user(&User::new("emma")).unwrap();

        let session = resolve(&store, None, Some("emma")).unwrap();
        assert_eq!(session.username, "emma");
    }

    #[test]
    fn test_resolve_missing() {
        let store = Store::open_in_memory().unwrap();
        assert!(matches!(resolve(&store, None, None), Err(SessionError::Missing)));
    }

    #[test]
    fn test_resolve_unknown_user() {
        let store = Store::open_in_memory().unwrap();
        assert!(matches!(
            resolve(&store, Some("ghost"), None),
            Err(SessionError::UnknownUser(_))
        ));
    }
}
