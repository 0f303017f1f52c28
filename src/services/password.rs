//! Credential verification: salted Argon2id hashes stored as PHC strings.
//!
//! Hashing is CPU bound; the async wrappers move it onto the blocking pool so
//! it never stalls the request executor.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hashing(String),
    #[error("invalid password hash format: {0}")]
    InvalidHash(String),
    #[error("failed to verify password: {0}")]
    Verification(String),
    #[error("password task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verification(e.to_string())),
    }
}

pub async fn hash_password_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

pub async fn verify_password_blocking(
    password: String,
    hash: String,
) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_phc_argon2id() {
        let hash = hash_password("salasana1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn correct_password_verifies() {
        let hash = hash_password("salasana1").unwrap();
        assert!(verify_password("salasana1", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = hash_password("salasana1").unwrap();
        assert!(!verify_password("Salasana1", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_a_fresh_salt() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_is_an_error() {
        let err = verify_password("x", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, PasswordError::InvalidHash(_)));
    }

    #[tokio::test]
    async fn blocking_wrappers_round_trip() {
        let hash = hash_password_blocking("salainen".to_string()).await.unwrap();
        assert!(
            verify_password_blocking("salainen".to_string(), hash)
                .await
                .unwrap()
        );
    }
}
