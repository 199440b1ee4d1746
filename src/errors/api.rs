use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::errors::ForumError;

/// Standardized error response body
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// API error responses shared by all endpoints
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Malformed or invalid input
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Missing or invalid credentials
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Authenticated but not allowed
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Referenced entity does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Operation clashes with existing state
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(Json(ErrorResponse {
            error: "bad_request".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(Json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: message.into(),
            status_code: 401,
        }))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: message.into(),
            status_code: 403,
        }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(Json(ErrorResponse {
            error: "conflict".to_string(),
            message: message.into(),
            status_code: 409,
        }))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        ApiError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: message.into(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(json) => &json.0.message,
            ApiError::Unauthorized(json) => &json.0.message,
            ApiError::Forbidden(json) => &json.0.message,
            ApiError::NotFound(json) => &json.0.message,
            ApiError::Conflict(json) => &json.0.message,
            ApiError::InternalError(json) => &json.0.message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<ForumError> for ApiError {
    fn from(err: ForumError) -> Self {
        match err {
            ForumError::NotFound { .. } => ApiError::not_found(err.to_string()),
            ForumError::Conflict(_) => ApiError::conflict(err.to_string()),
            ForumError::Forbidden(_) => ApiError::forbidden(err.to_string()),
            ForumError::Validation(_) => ApiError::bad_request(err.to_string()),
            ForumError::Database { .. }
            | ForumError::Transaction { .. }
            | ForumError::Crypto { .. }
            | ForumError::Storage { .. } => {
                tracing::error!("internal error: {err}");
                ApiError::internal_error("Internal server error".to_string())
            }
        }
    }
}
