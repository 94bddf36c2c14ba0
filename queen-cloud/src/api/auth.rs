//! Identity endpoints: register, login, me

use axum::{Extension, Json, extract::State};
use shared::models::{LoginRequest, LoginResponse, Principal, PrincipalCreate};

use super::ApiResult;
use crate::auth::CurrentPrincipal;
use crate::services::identity;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<PrincipalCreate>,
) -> ApiResult<Principal> {
    Ok(Json(identity::register(&state, req).await?))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    Ok(Json(identity::authenticate(&state, req).await?))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> ApiResult<Principal> {
    let principal = state
        .store()
        .find_principal_by_id(current.id)
        .await?
        .ok_or_else(shared::error::AppError::invalid_token)?;
    Ok(Json(principal))
}
