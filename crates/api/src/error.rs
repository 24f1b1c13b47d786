//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use erp_core::StoreError;
use erp_core::dashboard::DashboardError;
use erp_core::sales::SaleError;
use erp_shared::AppError;
use serde_json::json;

/// An error rendered as `{ "error": code, "message": message }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    code: String,
    message: String,
}

impl ApiError {
    /// Creates an error; unknown status codes become 500.
    #[must_use]
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code: code.into(),
            message: message.into(),
        }
    }

    /// HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl From<SaleError> for ApiError {
    fn from(err: SaleError) -> Self {
        Self::new(err.status_code(), err.error_code(), err.message())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::new(err.status, err.code, err.message)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let (AppError::BadRequest(message) | AppError::Internal(message)) = &err;
        Self::new(err.status_code(), err.error_code(), message.clone())
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::UnknownWidget(id) => Self::new(
                404,
                "rest_widget_invalid_id",
                format!("Unknown dashboard widget: {id}"),
            ),
            DashboardError::Store(err) => err.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(
            status = self.status.as_u16(),
            code = %self.code,
            message = %self.message,
            "request failed"
        );

        (
            self.status,
            Json(json!({ "error": self.code, "message": self.message })),
        )
            .into_response()
    }
}
