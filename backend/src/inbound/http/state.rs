//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! the domain services and stay testable with stub repositories.

use std::sync::Arc;

use crate::domain::{AuthService, JobService, TokenSigner};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login.
    pub auth: Arc<AuthService>,
    /// Job CRUD and bulk upsert.
    pub jobs: Arc<JobService>,
    /// Verifier for bearer tokens on protected routes.
    pub tokens: Arc<TokenSigner>,
}

impl HttpState {
    /// Bundle the services consumed by the HTTP adapter.
    pub fn new(auth: Arc<AuthService>, jobs: Arc<JobService>, tokens: Arc<TokenSigner>) -> Self {
        Self { auth, jobs, tokens }
    }
}
