//! Sales transaction routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderName, StatusCode, header::LOCATION},
    response::IntoResponse,
    routing::get,
};
use erp_core::sales::{Include, SALES_PATH, SaleRequest, item_schema};
use erp_shared::AppError;
use erp_shared::types::PageRequest;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::{AppState, error::ApiError, middleware::Ctx};

/// Creates the sales routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            SALES_PATH,
            get(list_sales).post(create_sale).options(sale_schema),
        )
        .route(
            "/erp/accounting/sales/{id}",
            get(get_sale)
                .put(update_sale)
                .delete(delete_sale)
                .options(sale_schema),
        )
}

/// Query parameters for listing sales.
#[derive(Debug, Default, Deserialize)]
pub struct ListSalesQuery {
    /// Page number (1-indexed, default: 1).
    pub page: Option<u32>,
    /// Number of sales per page (default: 10, max: 100).
    pub per_page: Option<u32>,
    /// Comma-separated sub-resources: `customer`, `created_by`.
    pub include: Option<String>,
}

/// Query parameters for reading or writing a single sale.
#[derive(Debug, Default, Deserialize)]
pub struct GetSaleQuery {
    /// Comma-separated sub-resources: `customer`, `created_by`.
    pub include: Option<String>,
}

fn body(payload: Result<Json<SaleRequest>, JsonRejection>) -> Result<SaleRequest, ApiError> {
    payload
        .map(|Json(request)| request)
        .map_err(|e| AppError::BadRequest(e.body_text()).into())
}

/// GET `/erp/accounting/sales` - List sales, newest first.
async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<ListSalesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let defaults = PageRequest::default();
    let page = PageRequest::new(
        query.page.unwrap_or(defaults.page),
        query.per_page.unwrap_or(defaults.per_page),
    );
    let include = Include::parse(query.include.as_deref());

    let sales = state.sales_service().list(page, include).await?;

    Ok((
        [
            (HeaderName::from_static("x-total"), sales.meta.total.to_string()),
            (
                HeaderName::from_static("x-total-pages"),
                sales.meta.total_pages.to_string(),
            ),
        ],
        Json(sales),
    ))
}

/// GET `/erp/accounting/sales/{id}` - Get one sale with its items.
async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<GetSaleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let include = Include::parse(query.include.as_deref());
    let sale = state.sales_service().get(id, include).await?;
    Ok(Json(sale))
}

/// POST `/erp/accounting/sales` - Create a sale.
async fn create_sale(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Query(query): Query<GetSaleQuery>,
    payload: Result<Json<SaleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body(payload)?;
    let include = Include::parse(query.include.as_deref());
    let service = state.sales_service();

    let sale = service.create(&ctx, &request, include).await?;
    info!(sale_id = sale.id, user_id = ctx.user_id(), "sale created");

    Ok((
        StatusCode::CREATED,
        [(LOCATION, service.resource_url(sale.id))],
        Json(sale),
    ))
}

/// PUT `/erp/accounting/sales/{id}` - Overwrite a sale and replace its items.
async fn update_sale(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<i64>,
    Query(query): Query<GetSaleQuery>,
    payload: Result<Json<SaleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body(payload)?;
    let include = Include::parse(query.include.as_deref());
    let service = state.sales_service();

    let sale = service.update(&ctx, id, &request, include).await?;
    info!(sale_id = sale.id, user_id = ctx.user_id(), "sale updated");

    Ok((
        StatusCode::CREATED,
        [(LOCATION, service.resource_url(sale.id))],
        Json(sale),
    ))
}

/// DELETE `/erp/accounting/sales/{id}` - Delete a sale and its items.
async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.sales_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// OPTIONS - Advisory item schema.
async fn sale_schema() -> Json<Value> {
    Json(item_schema())
}
