//! User identity - registration and credential checks.

mod credentials;
mod sqlite;

pub use credentials::{CredentialScheme, PlaintextScheme};
pub use sqlite::SqliteUserStore;

use thiserror::Error;

/// Errors for identity operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Username already taken: {0}")]
    NameTaken(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),
}

/// Trait for user storage.
pub trait UserStore: Send + Sync {
    /// Create a user and return its id. Fails when the name is taken.
    fn register(&self, name: &str, password: &str) -> Result<i64, UserError>;

    /// Return the user id on an exact credential match.
    ///
    /// Unknown name and wrong password are indistinguishable to the
    /// caller.
    fn authenticate(&self, name: &str, password: &str) -> Result<i64, UserError>;

    /// Display name for a user id.
    fn username_by_id(&self, user_id: i64) -> Result<Option<String>, UserError>;
}
