//! Domain types, ports, and services.
//!
//! Public surface:
//! - [`User`] / [`UserId`] — the user account row and its identifier.
//! - [`Error`] / [`ErrorCode`] — transport-agnostic failure payload.
//! - [`ports`] — driving use-case traits and the record store port.
//! - [`UserService`] — the policy service implementing the driving ports.

pub mod error;
pub mod ports;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::user::{User, UserId};
pub use self::user_service::UserService;
