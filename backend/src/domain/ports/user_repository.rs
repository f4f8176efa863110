//! Driven port for the user record store.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{User, UserId};

/// Errors raised by record store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
}

impl UserStoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port holding user rows keyed by id, with ids assigned on
/// first save and never reissued.
///
/// Find-then-write sequences issued by callers are not atomic: concurrent
/// mutation of the same id can interleave between calls. Adapters only
/// guarantee that each individual call is consistent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All persisted users, in store order.
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    /// Persist the record, assigning a fresh id when none is present, and
    /// return the stored row.
    async fn save(&self, user: &User) -> Result<User, UserStoreError>;

    /// Remove the record with the given identifier, if present.
    async fn delete_by_id(&self, id: UserId) -> Result<(), UserStoreError>;
}
