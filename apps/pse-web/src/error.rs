//! Error responses: `{"error": "..."}` with a status derived from the error kind.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pse_app::{AppError, ErrorKind};

#[derive(Debug)]
pub enum ApiError {
    App(AppError),
    /// Body missing, not JSON, or the wrong shape
    Body(JsonRejection),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Body(_) => StatusCode::BAD_REQUEST,
            ApiError::App(err) => match err.kind() {
                ErrorKind::BadInput => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Unsupported => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::App(err) => err.to_string(),
            ApiError::Body(rejection) => rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            tracing::error!(%status, error = %message, "request failed");
        } else {
            tracing::debug!(%status, error = %message, "request rejected");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_error_kind() {
        let not_found = ApiError::from(AppError::RecordNotFound("x".to_string()));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = ApiError::from(AppError::Validation("title".to_string()));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let unsupported = ApiError::from(AppError::Flow(pse_flow::FlowError::UnsupportedTier {
            tier: "4".to_string(),
        }));
        assert_eq!(unsupported.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
