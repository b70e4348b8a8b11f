use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use readsim_core::ValidationError;
use readsim_stream::StreamError;

use crate::cors::cors_headers;

/// Errors reported to the caller as a JSON envelope.
#[derive(Debug)]
pub enum ApiError {
    /// The request was rejected before any data was fetched.
    Validation(ValidationError),
    /// The reference store failed before the response started.
    Upstream(StreamError),
    /// The query string could not be decoded.
    BadQuery(String),
    Internal(String),
}

#[derive(Serialize, Debug)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize, Debug)]
struct ErrorDetail {
    code: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(e) => {
                StatusCode::from_u16(e.code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ApiError::BadQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::Upstream(e) => e.to_string(),
            ApiError::BadQuery(msg) | ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<StreamError> for ApiError {
    fn from(err: StreamError) -> Self {
        ApiError::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: ErrorDetail {
                code: status.as_u16(),
                message: self.message(),
            },
        };
        (status, cors_headers(), Json(body)).into_response()
    }
}
