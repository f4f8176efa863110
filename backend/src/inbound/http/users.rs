//! User endpoints.
//!
//! ```text
//! GET    /user        list users
//! POST   /user        create a user
//! GET    /user/{id}   fetch a user
//! PUT    /user/{id}   replace username/password (email immutable)
//! PATCH  /user/{id}   merge supplied fields (email immutable)
//! DELETE /user/{id}   delete a user
//! ```
//!
//! Handlers decode the payload, call one port operation, and let the
//! [`Error`] `ResponseError` impl translate failures to status codes.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};

use crate::domain::ports::UserPatch;
use crate::domain::{Error, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// List all users.
#[utoipa::path(
    get,
    path = "/user",
    responses(
        (status = 200, description = "All persisted users", body = [User]),
        (status = 503, description = "Record store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/user")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users_query.list_users().await?))
}

/// Create a user; any id in the body is discarded and the store assigns one.
#[utoipa::path(
    post,
    path = "/user",
    request_body = User,
    responses(
        (status = 200, description = "Created user with assigned id", body = User),
        (status = 400, description = "Missing or blank field", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["users"],
    operation_id = "addUser"
)]
#[post("/user")]
pub async fn add_user(
    state: web::Data<HttpState>,
    payload: web::Json<User>,
) -> ApiResult<web::Json<User>> {
    let created = state.users_command.add_user(payload.into_inner()).await?;
    Ok(web::Json(created))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The addressed user", body = User),
        (status = 404, description = "No such user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserById"
)]
#[get("/user/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users_query
        .get_user(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(user))
}

/// Replace the addressed user's username and password; email is immutable.
#[utoipa::path(
    put,
    path = "/user/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    request_body = User,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Body id does not match the path id", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 409, description = "Email cannot change after creation", body = Error)
    ),
    tags = ["users"],
    operation_id = "replaceUser"
)]
#[put("/user/{user_id}")]
pub async fn replace_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<User>,
) -> ApiResult<web::Json<User>> {
    let updated = state
        .users_command
        .replace_user(UserId::new(path.into_inner()), payload.into_inner())
        .await?;
    Ok(web::Json(updated))
}

/// Merge the supplied fields into the addressed user; email is immutable.
#[utoipa::path(
    patch,
    path = "/user/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Body id does not match the path id", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 409, description = "Email cannot change after creation", body = Error)
    ),
    tags = ["users"],
    operation_id = "patchUser"
)]
#[patch("/user/{user_id}")]
pub async fn patch_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserPatch>,
) -> ApiResult<web::Json<User>> {
    let updated = state
        .users_command
        .patch_user(UserId::new(path.into_inner()), payload.into_inner())
        .await?;
    Ok(web::Json(updated))
}

/// Delete a user by id.
#[utoipa::path(
    delete,
    path = "/user/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "No such user", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUserById"
)]
#[delete("/user/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .users_command
        .delete_user(UserId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().finish())
}
