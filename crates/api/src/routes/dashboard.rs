//! HR dashboard routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::Utc;
use erp_core::dashboard::{DashboardLayout, WidgetView};

use crate::{AppState, error::ApiError, middleware::Ctx};

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/erp/hrm/dashboard", get(dashboard))
        .route("/erp/hrm/dashboard/widgets/{id}", get(widget))
}

/// GET `/erp/hrm/dashboard` - All widgets grouped by column.
async fn dashboard(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
) -> Result<Json<DashboardLayout>, ApiError> {
    let today = Utc::now().date_naive();
    let layout = state.dashboard_service().layout(&ctx, today).await?;
    Ok(Json(layout))
}

/// GET `/erp/hrm/dashboard/widgets/{id}` - One widget.
async fn widget(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> Result<Json<WidgetView>, ApiError> {
    let today = Utc::now().date_naive();
    let view = state.dashboard_service().widget(&ctx, &id, today).await?;
    Ok(Json(view))
}
