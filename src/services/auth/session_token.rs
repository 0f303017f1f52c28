use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign session token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("session token verification failed: {0}")]
    Verify(#[source] jsonwebtoken::errors::Error),
    #[error("invalid 'sub' (expected UUID)")]
    InvalidSubject,
    #[error("token lifetime of {ttl_seconds}s does not fit a timestamp")]
    ExpiryOutOfRange { ttl_seconds: u64 },
}

/// Session token claims. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Verified token, promoted to application types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSession {
    pub user_id: Uuid,
}

/// HS256 session token issuer/verifier sharing one secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_seconds: u64, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds,
        }
    }

    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let exp = i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or(TokenError::ExpiryOutOfRange {
                ttl_seconds: self.ttl_seconds,
            })?;
        let claims = SessionClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now,
            exp,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Sign)
    }

    /// Checks signature and expiry, then parses the subject.
    pub fn verify(&self, token: &str) -> Result<VerifiedSession, TokenError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::Verify)?;

        let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::InvalidSubject)?;

        Ok(VerifiedSession { user_id })
    }
}
