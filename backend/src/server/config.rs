//! Process configuration read from the environment.

use std::env;
use std::net::SocketAddr;

use tracing::warn;

/// Failures while assembling the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("JWT_SECRET must be set")]
    MissingJwtSecret,
    #[error("invalid bind address {address}: {message}")]
    InvalidBindAddress { address: String, message: String },
}

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Assemble the configuration from environment variables.
    ///
    /// `DATABASE_URL` is mandatory. `JWT_SECRET` is mandatory in release
    /// builds; debug builds fall back to an ephemeral development secret.
    /// `HOST` defaults to `0.0.0.0` and `PORT` to `8080`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let jwt_secret = match env::var("JWT_SECRET").ok().filter(|value| !value.is_empty()) {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                warn!("JWT_SECRET not set, using ephemeral development secret");
                "devjobs-development-secret".to_owned()
            }
            None => return Err(ConfigError::MissingJwtSecret),
        };

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_owned());
        let bind_addr = parse_bind_addr(&host, &port)?;

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
        })
    }
}

fn parse_bind_addr(host: &str, port: &str) -> Result<SocketAddr, ConfigError> {
    let address = format!("{host}:{port}");
    address
        .parse()
        .map_err(|err: std::net::AddrParseError| ConfigError::InvalidBindAddress {
            address,
            message: err.to_string(),
        })
}
