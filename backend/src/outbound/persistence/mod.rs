//! Diesel persistence adapters for PostgreSQL.

mod diesel_job_repository;
mod diesel_user_repository;
mod models;
mod pool;
pub mod schema;

pub use diesel_job_repository::DieselJobRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolError, PoolSettings};
