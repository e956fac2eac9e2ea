//! Password hashing built on bcrypt.
//!
//! bcrypt is CPU-bound, so both hashing and verification run on the blocking
//! thread pool to keep request tasks responsive.

use crate::domain::Error;

/// Fixed bcrypt cost factor.
pub const HASH_COST: u32 = 10;

/// Hash a plaintext password with bcrypt at [`HASH_COST`].
pub async fn hash_password(password: String) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || {
        bcrypt::hash(password, HASH_COST)
            .map_err(|error| Error::internal(format!("password hashing failed: {error}")))
    })
    .await
    .map_err(|error| Error::internal(format!("password hashing task failed: {error}")))?
}

/// Check a plaintext password against a stored bcrypt hash.
pub async fn verify_password(password: String, hash: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || {
        bcrypt::verify(password, &hash)
            .map_err(|error| Error::internal(format!("password verification failed: {error}")))
    })
    .await
    .map_err(|error| Error::internal(format!("password verification task failed: {error}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_round_trips() {
        let hash = hash_password("hunter2".into()).await.expect("hash");
        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$2"));
        assert!(
            verify_password("hunter2".into(), hash.clone())
                .await
                .expect("verify")
        );
        assert!(
            !verify_password("wrong".into(), hash)
                .await
                .expect("verify")
        );
    }
}
