//! Async PostgreSQL connection pool built on `diesel-async` and `bb8`.
//!
//! Checkout never blocks the executor; stale or unreachable connections
//! surface as [`PoolError::Checkout`] which repositories map to their
//! connection error variant.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Errors raised while building or using the pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// The pool could not be constructed or reach the database.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
    /// No connection could be checked out within the timeout.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },
}

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub database_url: String,
    pub max_size: u32,
    pub connection_timeout: Duration,
}

impl PoolSettings {
    /// Settings with the default pool size (10) and checkout timeout (30s).
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            connection_timeout: Duration::from_secs(30),
        }
    }
}

/// Cloneable handle to the shared connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build a pool and establish the initial connections.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the database is unreachable or the
    /// URL is invalid; callers at startup treat this as fatal.
    pub async fn connect(settings: PoolSettings) -> Result<Self, PoolError> {
        let manager =
            AsyncDieselConnectionManager::<AsyncPgConnection>::new(&settings.database_url);
        let inner = Pool::builder()
            .max_size(settings.max_size)
            .connection_timeout(settings.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::Build {
                message: err.to_string(),
            })?;
        Ok(Self { inner })
    }

    /// Check out a connection.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner.get().await.map_err(|err| PoolError::Checkout {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults() {
        let settings = PoolSettings::new("postgres://localhost/devjobs");
        assert_eq!(settings.database_url, "postgres://localhost/devjobs");
        assert_eq!(settings.max_size, 10);
        assert_eq!(settings.connection_timeout, Duration::from_secs(30));
    }

    #[test]
    fn pool_errors_render_their_message() {
        let err = PoolError::Checkout {
            message: "timed out".into(),
        };
        assert!(err.to_string().contains("timed out"));
    }
}
