//! Admin screen routes: navigation and the mode-switch bar.

use axum::{Json, Router, extract::State, routing::get};
use erp_core::admin::{
    AdminBarNode, HIDDEN_HOST_SLUGS, MODE_NONCE_ACTION, NavEntry, mode_switch_nodes,
};
use erp_core::context::capabilities;
use erp_shared::AppError;
use serde::Serialize;

use crate::{AppState, error::ApiError, middleware::Ctx};

/// Creates the admin routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/erp/admin/menu", get(admin_menu))
        .route("/erp/admin/bar", get(admin_bar))
}

/// Response for the admin navigation.
#[derive(Debug, Serialize)]
pub struct MenuResponse {
    /// Entries visible to the user, in menu order.
    pub navigation: Vec<NavEntry>,
    /// Host slugs removed from the navigation.
    pub hidden: Vec<&'static str>,
}

/// Response for the admin bar.
#[derive(Debug, Serialize)]
pub struct BarResponse {
    /// Key of the active module.
    pub current: Option<String>,
    /// Mode-switch nodes.
    pub nodes: Vec<AdminBarNode>,
}

/// GET `/erp/admin/menu` - Navigation for the current user.
async fn admin_menu(State(state): State<AppState>, Ctx(ctx): Ctx) -> Json<MenuResponse> {
    Json(MenuResponse {
        navigation: state.admin_menu().navigation(&ctx),
        hidden: HIDDEN_HOST_SLUGS.to_vec(),
    })
}

/// GET `/erp/admin/bar` - Mode-switch nodes with a fresh nonce.
async fn admin_bar(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
) -> Result<Json<BarResponse>, ApiError> {
    let service = state.mode_switch_service();
    let current = service.current_module(&ctx).await?;

    let nodes = match current {
        Some(module) if ctx.can(capabilities::MANAGE_OPTIONS) => {
            let nonce = state
                .nonce_service
                .create(MODE_NONCE_ACTION, ctx.user_id())
                .map_err(|e| ApiError::from(AppError::Internal(e.to_string())))?;

            mode_switch_nodes(
                &ctx,
                service.registry(),
                module,
                &nonce,
                &state.config.admin.dashboard_url,
            )
        }
        _ => Vec::new(),
    };

    Ok(Json(BarResponse {
        current: current.map(|m| m.key.clone()),
        nodes,
    }))
}
