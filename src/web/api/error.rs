use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::power::PowerError;
use crate::predict::PredictError;

#[derive(Debug)]
pub enum ApiError {
    InvalidInput(String),
    DataUnavailable(String),
    NoPassFound,
    Upstream(String),
    Internal(String),
}

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        match e {
            PredictError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            PredictError::DataUnavailable(msg) => ApiError::DataUnavailable(msg),
            PredictError::NoPassFound => ApiError::NoPassFound,
            PredictError::Propagation(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<PowerError> for ApiError {
    fn from(e: PowerError) -> Self {
        match e {
            PowerError::InvalidDate(_) => ApiError::InvalidInput(e.to_string()),
            PowerError::Upstream(_) => ApiError::Upstream(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidInput(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("invalid_input", &msg)),
            )
                .into_response(),
            ApiError::DataUnavailable(msg) => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::with_message("data_unavailable", &msg)),
            )
                .into_response(),
            ApiError::NoPassFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::with_message(
                    "no_pass_found",
                    "No pass found in window",
                )),
            )
                .into_response(),
            ApiError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::with_message("upstream_error", &msg)),
            )
                .into_response(),
            ApiError::Internal(msg) => {
                log::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("internal_error")),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: None,
        }
    }

    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_distinct_statuses() {
        let status = |e: ApiError| e.into_response().status();

        assert_eq!(
            status(PredictError::InvalidInput("lat/lon required".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(PredictError::DataUnavailable("line 1 not found".into()).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status(PredictError::NoPassFound.into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status(PowerError::InvalidDate("2024".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(PowerError::Upstream("503".into()).into()),
            StatusCode::BAD_GATEWAY
        );
    }
}
