//! Port abstraction for user persistence adapters.

use async_trait::async_trait;

use crate::domain::{NewUser, User};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// A uniqueness constraint was violated.
    #[error("user {field} already taken")]
    Duplicate { field: String },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-key error naming the violated field.
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    async fn create_user(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;
}
