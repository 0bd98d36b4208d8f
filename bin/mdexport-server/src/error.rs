//! Unified server error type.
//!
//! Handlers return `Result<T, ServerError>`; [`IntoResponse`] is the only
//! place a failure is mapped to a status code. Every error body has the shape
//! `{"detail": "..."}`.
//!
//! Conversion failures are passed through to the caller verbatim (exit code
//! and converter stderr included) so the frontend can show them. Only
//! unclassified internal errors are reduced to a generic message.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mdexport_core::ConversionError;
use thiserror::Error;
use tracing::{error, warn};

use crate::schemas::convert::ErrorResponse;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The converter could not be started or exited unsuccessfully.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The request body was rejected before reaching the converter.
    #[error("{message}")]
    Validation { status: StatusCode, message: String },

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ServerError::Conversion(e) => {
                warn!(error = %e, "conversion failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ServerError::Validation { status, message } => (status, message),
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::Validation {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
