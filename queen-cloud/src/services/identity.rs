//! Identity: registration, login and bearer token resolution

use shared::error::{AppError, ErrorCode};
use shared::models::{
    DEFAULT_ROLE, LoginRequest, LoginResponse, Principal, PrincipalCreate, is_valid_email,
    normalize_email,
};
use shared::util::now_millis;
use uuid::Uuid;

use crate::auth::jwt;
use crate::error::ServiceResult;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

/// Register a principal; the password is stored only as an argon2 hash
pub async fn register(state: &AppState, data: PrincipalCreate) -> ServiceResult<Principal> {
    let email = normalize_email(&data.email);
    if !is_valid_email(&email) {
        return Err(AppError::new(ErrorCode::InvalidEmail).into());
    }
    if data.name.trim().is_empty() {
        return Err(AppError::validation("name must not be empty").into());
    }
    if data.password.is_empty() {
        return Err(AppError::validation("password must not be empty").into());
    }
    if state.store().find_principal_by_email(&email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).into());
    }

    let password_hash = hash_password(&data.password, state.hash_cost).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::internal("Password hashing failed")
    })?;

    let now = now_millis();
    let principal = Principal {
        id: Uuid::new_v4(),
        email,
        password_hash,
        name: data.name.trim().to_string(),
        role: DEFAULT_ROLE.to_string(),
        created_at: now,
        updated_at: now,
    };
    state.store().insert_principal(&principal).await?;

    tracing::info!(principal_id = %principal.id, "Principal registered");
    Ok(principal)
}

/// Verify credentials and issue a bearer token
pub async fn authenticate(state: &AppState, req: LoginRequest) -> ServiceResult<LoginResponse> {
    let email = normalize_email(&req.email);
    let principal = state
        .store()
        .find_principal_by_email(&email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &principal.password_hash) {
        tracing::debug!(principal_id = %principal.id, "Login rejected: password mismatch");
        return Err(AppError::invalid_credentials().into());
    }

    let token = jwt::create_token(principal.id, &state.jwt_secret, state.jwt_expires_days)
        .map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    tracing::info!(principal_id = %principal.id, "Principal logged in");
    Ok(LoginResponse {
        token,
        token_type: "bearer".to_string(),
        principal,
    })
}

/// Resolve a bearer token to its principal
pub async fn resolve(state: &AppState, token: &str) -> ServiceResult<Principal> {
    let principal_id = jwt::verify_token(token, &state.jwt_secret)?;
    state
        .store()
        .find_principal_by_id(principal_id)
        .await?
        .ok_or_else(|| {
            tracing::debug!(%principal_id, "Token subject no longer exists");
            AppError::invalid_token().into()
        })
}
