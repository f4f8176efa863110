//! Actix middleware shared across inbound adapters.

pub mod correlation;

pub use correlation::{Correlation, REQUEST_ID_HEADER, RequestId};
