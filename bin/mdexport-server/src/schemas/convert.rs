use mdexport_core::ConversionFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /convert`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertRequest {
    /// Markdown source to convert.
    pub markdown: String,
    /// Target format: `"md"`, `"docx"` or `"pdf"`.
    pub format: ConversionFormat,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable failure description.
    pub detail: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
}
