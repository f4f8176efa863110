//! User-management REST service.
//!
//! Layout follows a hexagonal split: `domain` holds the user entity, ports,
//! and the policy service; `inbound` and `outbound` hold the HTTP and
//! persistence adapters; `server` assembles the application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Correlation;
