//! ERP mode switch applied to every authenticated request.

use axum::{
    extract::{Query, Request, State},
    http::{StatusCode, header::LOCATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use erp_core::admin::{ModeSwitchOutcome, ModeSwitchParams};
use erp_shared::Claims;

use super::auth::Ctx;
use crate::AppState;

/// Switches the user's active module when the query asks for it.
///
/// A switch that passes every check redirects (302) to the dashboard.
/// Anything else, including a failing preference write, lets the request
/// through unchanged. Must run inside [`super::auth_middleware`].
pub async fn mode_switch_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(Ctx(ctx)) = request.extensions().get::<Claims>().map(Ctx::from_claims) else {
        return next.run(request).await;
    };
    let Ok(Query(params)) = Query::<ModeSwitchParams>::try_from_uri(request.uri()) else {
        return next.run(request).await;
    };
    if params.mode.is_none() && params.nonce.is_none() {
        return next.run(request).await;
    }

    let nonces = &state.nonce_service;
    let outcome = state
        .mode_switch_service()
        .apply(&ctx, &params, |nonce, action, user_id| {
            nonces.verify(nonce, action, user_id)
        })
        .await;

    match outcome {
        Ok(ModeSwitchOutcome::Switched {
            module,
            redirect_to,
        }) => {
            tracing::info!(user_id = ctx.user_id(), module = %module, "erp mode switched");
            (StatusCode::FOUND, [(LOCATION, redirect_to)]).into_response()
        }
        Ok(ModeSwitchOutcome::Ignored) => next.run(request).await,
        Err(e) => {
            tracing::warn!(user_id = ctx.user_id(), error = %e, "erp mode switch failed");
            next.run(request).await
        }
    }
}
