//! Driving port for user mutations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, User, UserId};

/// Partial update for a user record; absent fields keep their stored values.
///
/// Supplied `username`/`password` values overwrite the stored fields
/// verbatim. A supplied `id` or `email` must match the stored record — both
/// are immutable, so anything else is rejected rather than merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    #[schema(value_type = Option<i64>, example = 1)]
    pub id: Option<UserId>,
    #[schema(example = "newname")]
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    /// Patch setting only the username.
    pub fn username(value: impl Into<String>) -> Self {
        Self {
            username: Some(value.into()),
            ..Self::default()
        }
    }
}

/// Domain use-case port for creating, updating, and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and persist a new user; the store assigns the id.
    async fn add_user(&self, candidate: User) -> Result<User, Error>;

    /// Full update of the addressed record, email excepted.
    async fn replace_user(&self, id: UserId, replacement: User) -> Result<User, Error>;

    /// Partial update of the addressed record, email excepted.
    async fn patch_user(&self, id: UserId, patch: UserPatch) -> Result<User, Error>;

    /// Remove the addressed record.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
