//! Driving port for user read operations.
//!
//! Inbound adapters (HTTP handlers) use this port so they depend on the
//! use-case surface rather than on persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return all persisted users, in store order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return the user with the given identifier.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}
