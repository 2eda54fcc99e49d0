//! API error type and its HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use medcompare_common::CompareError;
use serde_json::json;

/// Errors returned by handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The submitted selection names something the catalog does not have.
    #[error(transparent)]
    Selection(#[from] CompareError),

    #[error("cannot render page: {0}")]
    Render(#[from] askama::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Selection(_) => StatusCode::BAD_REQUEST,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "rejected request");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
