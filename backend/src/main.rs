//! DevJobs backend entry point.
//!
//! Loads configuration, initialises structured logging, connects the
//! connection pool, applies pending migrations, and serves the REST API.
//! Loss of the database at startup is fatal: it is logged and the process
//! exits non-zero.

mod server;

use actix_web::HttpServer;
use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::{DbPool, PoolSettings};
use server::AppConfig;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations on a blocking thread.
async fn run_migrations(database_url: String) -> Result<(), String> {
    tokio::task::spawn_blocking(move || {
        let mut conn =
            diesel::PgConnection::establish(&database_url).map_err(|err| err.to_string())?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|applied| {
                if !applied.is_empty() {
                    info!(count = applied.len(), "applied pending migrations");
                }
            })
            .map_err(|err| err.to_string())
    })
    .await
    .map_err(|err| err.to_string())?
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(|err| {
        error!(%err, "invalid configuration");
        std::io::Error::other(err.to_string())
    })?;

    run_migrations(config.database_url.clone())
        .await
        .map_err(|err| {
            error!(%err, "database migration failed");
            std::io::Error::other(err)
        })?;

    let settings = PoolSettings::new(&config.database_url);
    let pool = DbPool::connect(settings).await.map_err(|err| {
        error!(%err, "database connection failed");
        std::io::Error::other(err.to_string())
    })?;

    let state = server::build_state(&config, pool);
    let bind_addr = config.bind_addr;
    info!(%bind_addr, "starting server");

    HttpServer::new(move || server::build_app(state.clone()))
        .bind(bind_addr)?
        .run()
        .await
}
