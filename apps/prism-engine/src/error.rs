//! Rich error handling for the engine's HTTP surface.
//!
//! Every failure leaving the engine carries an [`ErrorCode`], a message and
//! optional key/value context. Codes map onto HTTP status codes:
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `INVALID_REQUEST` | 400 | Malformed body, missing field, bad parameter |
//! | `RISK_NOT_FOUND` | 404 | Unknown risk id |
//! | `UPDATE_NOT_FOUND` | 404 | Unknown audit record id |
//! | `STORE_UNAVAILABLE` | 503 | Store backend failed |
//! | `INTERNAL_ERROR` | 500 | Unexpected failure |

use std::collections::HashMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::StoreError;
use crate::application::use_cases::{CalculationError, QueryError, UploadError};

/// Error codes for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Invalid request format or missing fields.
    InvalidRequest,
    /// Risk not found.
    RiskNotFound,
    /// Audit record not found.
    UpdateNotFound,
    /// Store backend failure.
    StoreUnavailable,
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::RiskNotFound | Self::UpdateNotFound => StatusCode::NOT_FOUND,
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::RiskNotFound => "RISK_NOT_FOUND",
            Self::UpdateNotFound => "UPDATE_NOT_FOUND",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A rich error with context.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct EngineError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl EngineError {
    /// Create a new engine error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Convert to the JSON error body.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            status: self.code.status_code().as_u16(),
            details: self.context.iter().cloned().collect(),
        }
    }

    /// Invalid request.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

/// HTTP error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    /// Additional details.
    pub details: HashMap<String, String>,
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        if self.code.status_code().is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "Request failed");
        }
        (self.code.status_code(), Json(self.to_http_response())).into_response()
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::RiskNotFound(id) => Self::new(ErrorCode::RiskNotFound, err.to_string())
                .with_context("risk_id", id.as_str()),
            StoreError::UpdateNotFound(id) => {
                Self::new(ErrorCode::UpdateNotFound, err.to_string())
                    .with_context("update_id", id.as_str())
            }
            StoreError::Serialization { .. } => Self::internal(err.to_string()),
            StoreError::Backend { .. } => Self::new(ErrorCode::StoreUnavailable, err.to_string()),
        }
    }
}

impl From<QueryError> for EngineError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Store(e) => e.into(),
            QueryError::Catalog(e) => Self::internal(e.to_string()),
        }
    }
}

impl From<CalculationError> for EngineError {
    fn from(err: CalculationError) -> Self {
        match err {
            CalculationError::Store(e) => e.into(),
            CalculationError::Catalog(e) => {
                Self::internal(format!("Error calculating exposures: {e}"))
            }
        }
    }
}

impl From<UploadError> for EngineError {
    fn from(err: UploadError) -> Self {
        let error = Self::invalid_request(err.to_string());
        match err {
            UploadError::MissingField(field) => error.with_context("field", field),
            UploadError::InvalidJson | UploadError::NotAnObject => error,
        }
    }
}
