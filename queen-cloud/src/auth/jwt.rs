//! Bearer token issue and verification (HS256)

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use uuid::Uuid;

/// JWT claims for principal authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct PrincipalClaims {
    /// Principal ID
    pub sub: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Create a token for `principal_id` valid for `expires_days`
pub fn create_token(
    principal_id: Uuid,
    secret: &str,
    expires_days: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = PrincipalClaims {
        sub: principal_id.to_string(),
        exp: (now + chrono::Duration::days(expires_days)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the subject principal id
pub fn verify_token(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let mut validation = Validation::default();
    validation.leeway = 0;
    let token_data = jsonwebtoken::decode::<PrincipalClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::token_expired(),
            _ => AppError::invalid_token(),
        }
    })?;

    Uuid::parse_str(&token_data.claims.sub).map_err(|_| AppError::invalid_token())
}
