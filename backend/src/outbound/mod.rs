//! Outbound adapters implementing domain ports for infrastructure.
//!
//! Adapters are thin translators between domain types and storage
//! representations; they contain no policy.

pub mod persistence;
