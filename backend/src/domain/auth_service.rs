//! Registration and login service.
//!
//! Passwords are hashed before anything reaches the repository, and login
//! failures collapse into one generic message so callers cannot probe which
//! emails are registered.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::token::TokenSigner;
use crate::domain::{
    CredentialsValidationError, Error, LoginCredentials, NewUser, SignupCredentials, UserProfile,
    password,
};

/// Raw signup fields as received from the transport layer.
#[derive(Debug, Clone, Default)]
pub struct SignupPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Raw login fields as received from the transport layer.
#[derive(Debug, Clone, Default)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Service implementing user registration and token issuance.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenSigner>,
}

fn map_validation_error(error: CredentialsValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": error.field() }))
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::Duplicate { field } => {
            Error::conflict(format!("{field} already registered"))
                .with_details(json!({ "field": field }))
        }
    }
}

fn invalid_credentials() -> Error {
    // One message for unknown email and wrong password alike.
    Error::unauthorized("invalid credentials")
}

impl AuthService {
    /// Create a new service over a user repository and token signer.
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenSigner>) -> Self {
        Self { users, tokens }
    }

    /// Register a new user and return the public projection.
    pub async fn signup(&self, payload: SignupPayload) -> Result<UserProfile, Error> {
        let credentials = SignupCredentials::try_from_parts(
            payload.username.as_deref(),
            payload.email.as_deref(),
            payload.password.as_deref(),
        )
        .map_err(map_validation_error)?;

        let password_hash = password::hash_password(credentials.password).await?;
        let user = self
            .users
            .create_user(&NewUser {
                username: credentials.username,
                email: credentials.email,
                password_hash,
            })
            .await
            .map_err(map_persistence_error)?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(UserProfile::from(&user))
    }

    /// Authenticate by email and password, issuing a bearer token.
    pub async fn login(&self, payload: LoginPayload) -> Result<String, Error> {
        let credentials =
            LoginCredentials::try_from_parts(payload.email.as_deref(), payload.password.as_deref())
                .map_err(map_validation_error)?;

        let user = self
            .users
            .find_by_email(&credentials.email)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(invalid_credentials)?;

        let matches =
            password::verify_password(credentials.password, user.password_hash.clone()).await?;
        if !matches {
            return Err(invalid_credentials());
        }

        tracing::info!(user_id = %user.id, "login succeeded");
        self.tokens.issue(user.id)
    }
}
