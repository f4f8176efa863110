//! Server configuration read from the environment.

use std::net::SocketAddr;

use thiserror::Error;

/// Environment variable naming the socket address to bind.
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Failures while assembling the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The supplied bind address does not parse as `host:port`.
    #[error("{var} value {value:?} is not a valid socket address: {source}")]
    InvalidBindAddr {
        var: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from the process environment, falling back to
    /// `0.0.0.0:8080` when `BIND_ADDR` is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_bind_addr(std::env::var(BIND_ADDR_VAR).ok())
    }

    fn from_bind_addr(raw: Option<String>) -> Result<Self, ConfigError> {
        let value = raw.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                var: BIND_ADDR_VAR,
                value: value.clone(),
                source,
            })?;
        Ok(Self { bind_addr })
    }
}
