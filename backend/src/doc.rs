//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates the user endpoints, the health probes, and the
//! schemas they reference. Swagger UI serves the document in debug builds.

use utoipa::OpenApi;

use crate::domain::ports::UserPatch;
use crate::domain::{Error, ErrorCode, User, UserId};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users backend API",
        description = "User management endpoints and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::add_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::replace_user,
        crate::inbound::http::users::patch_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, UserId, UserPatch, Error, ErrorCode)),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
