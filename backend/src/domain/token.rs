//! Bearer token issuing and verification.
//!
//! Tokens are HS256-signed JWTs carrying the user id as subject plus
//! issued-at and expiry timestamps. Verification failures collapse into a
//! single unauthorized error so callers cannot distinguish a bad signature
//! from an expired token.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Error;

/// Token lifetime: one hour from issue.
pub const TOKEN_TTL_HOURS: i64 = 1;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's id.
    pub sub: Uuid,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Signs and verifies access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    /// Build a signer from the configured secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for `user_id` expiring [`TOKEN_TTL_HOURS`] after `now`.
    pub fn issue_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<String, Error> {
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|error| Error::internal(format!("failed to sign token: {error}")))
    }

    /// Issue a token for `user_id` expiring one hour from now.
    pub fn issue(&self, user_id: Uuid) -> Result<String, Error> {
        self.issue_at(user_id, Utc::now())
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|error| {
                tracing::debug!(%error, "token verification failed");
                Error::unauthorized("invalid or expired token")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret")
    }

    #[test]
    fn issued_tokens_verify_and_carry_the_subject() {
        let user_id = Uuid::new_v4();
        let token = signer().issue(user_id).expect("token issued");
        let claims = signer().verify(&token).expect("token verifies");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let issued = Utc::now() - Duration::hours(2);
        let token = signer()
            .issue_at(Uuid::new_v4(), issued)
            .expect("token issued");
        let err = signer().verify(&token).expect_err("expired token rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = TokenSigner::new("other-secret")
            .issue(Uuid::new_v4())
            .expect("token issued");
        let err = signer().verify(&token).expect_err("foreign token rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let err = signer()
            .verify("not-a-token")
            .expect_err("garbage rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
