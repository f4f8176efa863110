//! User domain service.
//!
//! Implements the user driving ports over any [`UserRepository`]. All
//! creation and update policy lives here: blank-field checks on creation,
//! email uniqueness, id matching between path and body, and the
//! immutable-email rule. Update operations merge values verbatim — only
//! creation re-validates field content.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{UserPatch, UserRepository, UserStoreError, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserId};

fn map_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserStoreError::Query { message } => Error::internal(format!("user store error: {message}")),
    }
}

fn require_present(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(
            Error::validation(format!("{field} must not be empty or blank"))
                .with_details(json!({ "field": field })),
        );
    }
    Ok(())
}

/// User service implementing the query and command driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service with the given record store.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    async fn fetch_existing(&self, id: UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo.find_all().await.map_err(map_store_error)
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.fetch_existing(id).await
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn add_user(&self, candidate: User) -> Result<User, Error> {
        require_present("username", candidate.username())?;
        require_present("password", candidate.password())?;
        require_present("email", candidate.email())?;

        let existing = self
            .user_repo
            .find_by_email(candidate.email())
            .await
            .map_err(map_store_error)?;
        if existing.is_some() {
            return Err(Error::duplicate_email(format!(
                "a user with email {} already exists",
                candidate.email()
            )));
        }

        // Client-supplied ids are discarded; the store assigns the id.
        self.user_repo
            .save(&candidate.without_id())
            .await
            .map_err(map_store_error)
    }

    async fn replace_user(&self, id: UserId, replacement: User) -> Result<User, Error> {
        let mut stored = self.fetch_existing(id).await?;

        if replacement.id() != stored.id() {
            return Err(Error::id_mismatch(
                "path id and request body id do not match",
            ));
        }
        if replacement.email() != stored.email() {
            return Err(Error::immutable_field(
                "email cannot be changed after creation",
            ));
        }

        stored.set_username(replacement.username());
        stored.set_password(replacement.password());
        self.user_repo.save(&stored).await.map_err(map_store_error)
    }

    async fn patch_user(&self, id: UserId, patch: UserPatch) -> Result<User, Error> {
        let mut stored = self.fetch_existing(id).await?;

        if let Some(patch_id) = patch.id {
            if Some(patch_id) != stored.id() {
                return Err(Error::id_mismatch(
                    "path id and request body id do not match",
                ));
            }
        }
        if let Some(email) = patch.email.as_deref() {
            if email != stored.email() {
                return Err(Error::immutable_field(
                    "email cannot be changed after creation",
                ));
            }
        }

        if let Some(username) = patch.username {
            stored.set_username(username);
        }
        if let Some(password) = patch.password {
            stored.set_password(password);
        }

        // Written even when nothing changed so patch and replace have
        // identical store side effects.
        self.user_repo.save(&stored).await.map_err(map_store_error)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        // Existence is checked first so the store never receives a delete
        // for a missing id.
        let stored = self.fetch_existing(id).await?;
        let stored_id = stored
            .id()
            .ok_or_else(|| Error::internal(format!("stored user {id} is missing an id")))?;
        self.user_repo
            .delete_by_id(stored_id)
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
