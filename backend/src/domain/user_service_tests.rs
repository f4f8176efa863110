//! Behavioural coverage for the user service policy.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use super::UserService;
use crate::domain::ports::{MockUserRepository, UserPatch, UserStoreError, UsersCommand, UsersQuery};
use crate::domain::{ErrorCode, User, UserId};

fn service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

fn stored_user() -> User {
    User::persisted(UserId::new(1), "user123", "password123", "user@test.com")
}

#[tokio::test]
async fn list_users_returns_store_order() {
    let first = stored_user();
    let second = User::persisted(UserId::new(2), "other", "secret", "other@test.com");
    let expected = vec![first.clone(), second.clone()];

    let mut repo = MockUserRepository::new();
    repo.expect_find_all()
        .times(1)
        .return_once(move || Ok(vec![first, second]));

    let users = service(repo).list_users().await.expect("users list");
    assert_eq!(users, expected);
}

#[tokio::test]
async fn get_user_returns_matching_record() {
    let stored = stored_user();
    let expected = stored.clone();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .withf(|id| *id == UserId::new(1))
        .times(1)
        .return_once(move |_| Ok(Some(stored)));

    let user = service(repo).get_user(UserId::new(1)).await.expect("user");
    assert_eq!(user, expected);
}

#[tokio::test]
async fn get_user_unknown_id_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = service(repo)
        .get_user(UserId::new(9))
        .await
        .expect_err("missing user");
    assert_eq!(error.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn add_user_persists_and_returns_assigned_id() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .withf(|email| email == "user@test.com")
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_save()
        .withf(|user: &User| user.id().is_none() && user.username() == "user123")
        .times(1)
        .return_once(|user| Ok(user.clone().with_id(UserId::new(1))));

    let created = service(repo)
        .add_user(User::new("user123", "password123", "user@test.com"))
        .await
        .expect("user created");
    assert_eq!(created.id(), Some(UserId::new(1)));
    assert_eq!(created.email(), "user@test.com");
}

#[tokio::test]
async fn add_user_discards_client_supplied_id() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().times(1).return_once(|_| Ok(None));
    repo.expect_save()
        .withf(|user: &User| user.id().is_none())
        .times(1)
        .return_once(|user| Ok(user.clone().with_id(UserId::new(3))));

    let candidate =
        User::persisted(UserId::new(99), "user123", "password123", "user@test.com");
    let created = service(repo).add_user(candidate).await.expect("user created");
    assert_eq!(created.id(), Some(UserId::new(3)));
}

#[rstest]
#[case(User::new("", "password123", "user@test.com"), "username")]
#[case(User::new("   ", "password123", "user@test.com"), "username")]
#[case(User::new("user123", "", "user@test.com"), "password")]
#[case(User::new("user123", " ", "user@test.com"), "password")]
#[case(User::new("user123", "password123", ""), "email")]
#[case(User::new("user123", "password123", "\t"), "email")]
#[tokio::test]
async fn add_user_rejects_blank_fields(#[case] candidate: User, #[case] field: &str) {
    // No expectations: the store must not be touched on validation failure.
    let repo = MockUserRepository::new();

    let error = service(repo)
        .add_user(candidate)
        .await
        .expect_err("validation failure");
    assert_eq!(error.code, ErrorCode::Validation);
    assert_eq!(error.details, Some(json!({ "field": field })));
}

#[tokio::test]
async fn add_user_rejects_duplicate_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .withf(|email| email == "user@test.com")
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));

    let error = service(repo)
        .add_user(User::new("someone", "secret", "user@test.com"))
        .await
        .expect_err("duplicate email");
    assert_eq!(error.code, ErrorCode::DuplicateEmail);
}

#[tokio::test]
async fn replace_user_unknown_id_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = service(repo)
        .replace_user(UserId::new(9), stored_user())
        .await
        .expect_err("missing user");
    assert_eq!(error.code, ErrorCode::NotFound);
}

#[rstest]
#[case(User::new("newname", "newpass", "user@test.com"))]
#[case(User::persisted(UserId::new(2), "newname", "newpass", "user@test.com"))]
#[tokio::test]
async fn replace_user_rejects_missing_or_mismatched_body_id(#[case] replacement: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));

    let error = service(repo)
        .replace_user(UserId::new(1), replacement)
        .await
        .expect_err("id mismatch");
    assert_eq!(error.code, ErrorCode::IdMismatch);
}

#[tokio::test]
async fn replace_user_rejects_changed_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));

    let replacement = User::persisted(UserId::new(1), "newname", "newpass", "new@test.com");
    let error = service(repo)
        .replace_user(UserId::new(1), replacement)
        .await
        .expect_err("immutable email");
    assert_eq!(error.code, ErrorCode::ImmutableField);
}

#[tokio::test]
async fn replace_user_overwrites_username_and_password() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));
    repo.expect_save()
        .withf(|user: &User| {
            user.id() == Some(UserId::new(1))
                && user.username() == "newname"
                && user.password() == "newpass"
                && user.email() == "user@test.com"
        })
        .times(1)
        .return_once(|user| Ok(user.clone()));

    let replacement = User::persisted(UserId::new(1), "newname", "newpass", "user@test.com");
    let updated = service(repo)
        .replace_user(UserId::new(1), replacement)
        .await
        .expect("replaced user");
    assert_eq!(updated.username(), "newname");
    assert_eq!(updated.email(), "user@test.com");
}

#[tokio::test]
async fn patch_user_changes_only_username() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));
    repo.expect_save()
        .withf(|user: &User| {
            user.username() == "newname"
                && user.password() == "password123"
                && user.email() == "user@test.com"
        })
        .times(1)
        .return_once(|user| Ok(user.clone()));

    let updated = service(repo)
        .patch_user(UserId::new(1), UserPatch::username("newname"))
        .await
        .expect("patched user");
    assert_eq!(updated.username(), "newname");
    assert_eq!(updated.email(), "user@test.com");
}

#[tokio::test]
async fn patch_user_accepts_matching_id_and_email_as_noop() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));
    repo.expect_save().times(1).return_once(|user| Ok(user.clone()));

    let patch = UserPatch {
        id: Some(UserId::new(1)),
        email: Some("user@test.com".into()),
        ..UserPatch::default()
    };
    let updated = service(repo)
        .patch_user(UserId::new(1), patch)
        .await
        .expect("patched user");
    assert_eq!(updated, stored_user());
}

#[tokio::test]
async fn patch_user_rejects_mismatched_id() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));

    let patch = UserPatch {
        id: Some(UserId::new(2)),
        ..UserPatch::default()
    };
    let error = service(repo)
        .patch_user(UserId::new(1), patch)
        .await
        .expect_err("id mismatch");
    assert_eq!(error.code, ErrorCode::IdMismatch);
}

#[tokio::test]
async fn patch_user_rejects_changed_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));

    let patch = UserPatch {
        email: Some("new@test.com".into()),
        ..UserPatch::default()
    };
    let error = service(repo)
        .patch_user(UserId::new(1), patch)
        .await
        .expect_err("immutable email");
    assert_eq!(error.code, ErrorCode::ImmutableField);
}

#[tokio::test]
async fn patch_user_empty_patch_still_writes() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));
    repo.expect_save().times(1).return_once(|user| Ok(user.clone()));

    let updated = service(repo)
        .patch_user(UserId::new(1), UserPatch::default())
        .await
        .expect("patched user");
    assert_eq!(updated, stored_user());
}

#[tokio::test]
async fn patch_user_unknown_id_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = service(repo)
        .patch_user(UserId::new(9), UserPatch::username("newname"))
        .await
        .expect_err("missing user");
    assert_eq!(error.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_user_unknown_id_is_not_found() {
    // delete_by_id has no expectation: the store must never see the delete.
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = service(repo)
        .delete_user(UserId::new(9))
        .await
        .expect_err("missing user");
    assert_eq!(error.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_user_removes_record() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user())));
    repo.expect_delete_by_id()
        .withf(|id| *id == UserId::new(1))
        .times(1)
        .return_once(|_| Ok(()));

    service(repo)
        .delete_user(UserId::new(1))
        .await
        .expect("user deleted");
}

#[tokio::test]
async fn store_connection_failure_maps_to_service_unavailable() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Err(UserStoreError::connection("refused")));

    let error = service(repo)
        .get_user(UserId::new(1))
        .await
        .expect_err("store failure");
    assert_eq!(error.code, ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn store_query_failure_maps_to_internal_error() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_all()
        .times(1)
        .return_once(|| Err(UserStoreError::query("syntax error")));

    let error = service(repo).list_users().await.expect_err("store failure");
    assert_eq!(error.code, ErrorCode::InternalError);
}
