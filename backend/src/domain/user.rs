//! User identity types.
//!
//! [`User`] is the internal record and deliberately does not implement
//! `Serialize`: the password hash can never reach a response body by
//! accident. Externally visible representations go through [`UserProfile`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Internal user record, including the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a user about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Public projection of a user, safe to serialize in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Validation failures for signup and login inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error("username is required")]
    MissingUsername,
    #[error("email is required")]
    MissingEmail,
    #[error("password is required")]
    MissingPassword,
}

impl CredentialsValidationError {
    /// Name of the offending field, for structured error details.
    pub fn field(self) -> &'static str {
        match self {
            Self::MissingUsername => "username",
            Self::MissingEmail => "email",
            Self::MissingPassword => "password",
        }
    }
}

fn require(
    value: Option<&str>,
    missing: CredentialsValidationError,
) -> Result<String, CredentialsValidationError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Ok(raw.to_owned()),
        _ => Err(missing),
    }
}

/// Validated signup input. The password is still plaintext here; it is hashed
/// by the auth service before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupCredentials {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupCredentials {
    /// Validate raw signup fields, requiring all three to be non-empty.
    pub fn try_from_parts(
        username: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            username: require(username, CredentialsValidationError::MissingUsername)?,
            email: require(email, CredentialsValidationError::MissingEmail)?,
            password: require(password, CredentialsValidationError::MissingPassword)?,
        })
    }
}

/// Validated login input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    /// Validate raw login fields, requiring both to be non-empty.
    pub fn try_from_parts(
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            email: require(email, CredentialsValidationError::MissingEmail)?,
            password: require(password, CredentialsValidationError::MissingPassword)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some("a@b.c"), Some("pw"), CredentialsValidationError::MissingUsername)]
    #[case(Some("ada"), None, Some("pw"), CredentialsValidationError::MissingEmail)]
    #[case(Some("ada"), Some("a@b.c"), None, CredentialsValidationError::MissingPassword)]
    #[case(Some("  "), Some("a@b.c"), Some("pw"), CredentialsValidationError::MissingUsername)]
    fn signup_requires_all_fields(
        #[case] username: Option<&str>,
        #[case] email: Option<&str>,
        #[case] password: Option<&str>,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = SignupCredentials::try_from_parts(username, email, password)
            .expect_err("missing field must be rejected");
        assert_eq!(err, expected);
    }

    #[test]
    fn signup_accepts_complete_input() {
        let credentials = SignupCredentials::try_from_parts(Some("ada"), Some("ada@acme.io"), Some("pw"))
            .expect("valid signup input");
        assert_eq!(credentials.username, "ada");
        assert_eq!(credentials.email, "ada@acme.io");
    }

    #[test]
    fn login_requires_both_fields() {
        let err = LoginCredentials::try_from_parts(Some("a@b.c"), Some(""))
            .expect_err("empty password must be rejected");
        assert_eq!(err, CredentialsValidationError::MissingPassword);
        assert_eq!(err.field(), "password");
    }

    #[test]
    fn profile_excludes_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "ada".into(),
            email: "ada@acme.io".into(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let profile = UserProfile::from(&user);
        let value = serde_json::to_value(&profile).expect("serializable profile");
        let rendered = value.to_string();
        assert!(!rendered.contains("passwordHash"));
        assert!(!rendered.contains("$2b$"));
        assert_eq!(value["username"], "ada");
    }
}
