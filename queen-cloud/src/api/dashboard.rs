//! Dashboard endpoints

use axum::{Extension, Json, extract::State};
use shared::models::{DashboardStats, ExpiringItem, UpcomingItem};

use super::ApiResult;
use crate::auth::CurrentPrincipal;
use crate::services::dashboard;
use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> ApiResult<DashboardStats> {
    Ok(Json(dashboard::stats(state.store(), current.id).await?))
}

/// GET /api/dashboard/upcoming
pub async fn upcoming(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> ApiResult<Vec<UpcomingItem>> {
    Ok(Json(dashboard::upcoming(state.store(), current.id).await?))
}

/// GET /api/dashboard/expiring
pub async fn expiring(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> ApiResult<Vec<ExpiringItem>> {
    Ok(Json(dashboard::expiring(state.store(), current.id).await?))
}
