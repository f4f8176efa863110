//! User account data model.
//!
//! The entity mirrors the persisted row: an optional store-assigned id plus
//! the three account fields. Field content is deliberately unvalidated here;
//! creation-time policy (blank checks, email uniqueness) lives in the user
//! service so that update operations can merge values verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable numeric user identifier assigned by the record store on creation.
///
/// # Examples
/// ```
/// use users_backend::domain::UserId;
///
/// let id = UserId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw identifier.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User account row.
///
/// ## Invariants (enforced by the user service, not the type)
/// - `email` is unique across persisted users and never changes once the
///   record exists.
/// - `id` is `None` until the record store assigns one; it never changes
///   afterwards.
///
/// Serialised shape: `{"id": number|null, "username": string, "password":
/// string, "email": string}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct User {
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 1)]
    id: Option<UserId>,
    #[schema(example = "user123")]
    username: String,
    #[schema(example = "password123")]
    password: String,
    #[schema(example = "user@test.com")]
    email: String,
}

impl User {
    /// Build an unsaved user; the record store assigns the id on creation.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            password: password.into(),
            email: email.into(),
        }
    }

    /// Build a user carrying an already-assigned identifier.
    pub fn persisted(
        id: UserId,
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            username: username.into(),
            password: password.into(),
            email: email.into(),
        }
    }

    /// Store-assigned identifier, absent on unsaved records.
    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    /// Account name shown when listing users.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Stored credential. Plain text, matching the upstream system.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Contact address; unique and immutable once persisted.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Return a copy carrying the given identifier.
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Return a copy with the identifier cleared.
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    /// Overwrite the account name.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// Overwrite the stored credential.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn unsaved_user_serialises_null_id() {
        let user = User::new("user123", "password123", "user@test.com");
        let value = serde_json::to_value(&user).expect("user serialises");
        assert_eq!(
            value,
            json!({
                "id": null,
                "username": "user123",
                "password": "password123",
                "email": "user@test.com",
            })
        );
    }

    #[rstest]
    fn body_without_id_deserialises() {
        let user: User = serde_json::from_value(json!({
            "username": "user123",
            "password": "password123",
            "email": "user@test.com",
        }))
        .expect("body without id accepted");
        assert_eq!(user.id(), None);
        assert_eq!(user.username(), "user123");
    }

    #[rstest]
    fn unknown_fields_are_rejected() {
        let result: Result<User, _> = serde_json::from_value(json!({
            "username": "user123",
            "password": "password123",
            "email": "user@test.com",
            "role": "admin",
        }));
        assert!(result.is_err());
    }

    #[rstest]
    fn with_id_assigns_and_without_id_clears() {
        let user = User::new("user123", "password123", "user@test.com").with_id(UserId::new(4));
        assert_eq!(user.id(), Some(UserId::new(4)));
        assert_eq!(user.without_id().id(), None);
    }
}
