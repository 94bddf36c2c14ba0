//! Production endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppError};
use shared::models::{AcceptanceUpdate, ProductionBatch, ProductionCreate, ProductionUpdate};
use uuid::Uuid;

use super::ApiResult;
use crate::auth::CurrentPrincipal;
use crate::services::productions;
use crate::state::AppState;

/// GET /api/productions
pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> ApiResult<Vec<ProductionBatch>> {
    Ok(Json(productions::list(state.store(), current.id).await?))
}

/// POST /api/productions
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Json(req): Json<ProductionCreate>,
) -> ApiResult<ProductionBatch> {
    Ok(Json(productions::create(state.store(), current.id, req).await?))
}

/// GET /api/productions/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<Uuid>,
) -> ApiResult<ProductionBatch> {
    Ok(Json(productions::get(state.store(), id, current.id).await?))
}

/// PUT /api/productions/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProductionUpdate>,
) -> ApiResult<ProductionBatch> {
    Ok(Json(
        productions::update(state.store(), id, current.id, req).await?,
    ))
}

/// PUT /api/productions/{id}/acceptance
pub async fn record_acceptance(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<Uuid>,
    Json(req): Json<AcceptanceUpdate>,
) -> ApiResult<ProductionBatch> {
    Ok(Json(
        productions::record_acceptance(state.store(), id, current.id, req).await?,
    ))
}

/// DELETE /api/productions/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse, AppError> {
    productions::delete(state.store(), id, current.id).await?;
    Ok(ApiResponse::ok_with_message("Production record deleted"))
}
