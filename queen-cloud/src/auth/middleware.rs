//! Bearer authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;
use shared::models::Principal;
use uuid::Uuid;

use crate::services::identity;
use crate::state::AppState;

/// Authenticated principal, inserted into request extensions
#[derive(Debug, Clone)]
pub struct CurrentPrincipal {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<Principal> for CurrentPrincipal {
    fn from(p: Principal) -> Self {
        Self {
            id: p.id,
            email: p.email,
            name: p.name,
            role: p.role,
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn extract_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Require a valid bearer token and resolve it to a [`CurrentPrincipal`]
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer)
        .map(str::to_owned)
        .ok_or_else(|| {
            tracing::debug!(uri = ?req.uri(), "Missing or malformed Authorization header");
            AppError::not_authenticated()
        })?;

    let principal = identity::resolve(&state, &token).await.map_err(|e| {
        tracing::warn!(uri = ?req.uri(), error = %e, "Bearer token rejected");
        AppError::from(e)
    })?;

    req.extensions_mut().insert(CurrentPrincipal::from(principal));
    Ok(next.run(req).await)
}
