//! `POST /convert` – markdown to md/docx/pdf attachment.
//!
//! The body is validated by the JSON extractor (unknown `format` tokens and
//! missing fields never reach the converter). On success the converter's
//! bytes are returned untouched as an attachment named `export.<ext>`.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use mdexport_core::{ConversionFormat, ConvertedDocument};
use tracing::debug;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::convert::{ConvertRequest, ErrorResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(convert),
    components(schemas(ConvertRequest, ConversionFormat, ErrorResponse)),
)]
pub struct ConvertApi;

/// Markdown payloads are unbounded: whole documents, inline images included,
/// are posted here, so axum's default 2 MiB body cap is lifted.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/convert", post(convert))
        .layer(DefaultBodyLimit::disable())
}

#[utoipa::path(
    post,
    path = "/convert",
    tag = "convert",
    request_body = ConvertRequest,
    responses(
        (
            status = 200,
            description = "Converted document as an attachment. Content-Type is \
                `text/markdown; charset=utf-8`, \
                `application/vnd.openxmlformats-officedocument.wordprocessingml.document` \
                or `application/pdf` depending on `format`",
            content_type = "application/octet-stream",
            body = Vec<u8>
        ),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (
            status = 415,
            description = "Missing `application/json` content type",
            body = ErrorResponse
        ),
        (status = 422, description = "Missing field or unknown format", body = ErrorResponse),
        (
            status = 500,
            description = "Converter could not be started or failed",
            body = ErrorResponse
        ),
    )
)]
pub async fn convert(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(req) = payload?;
    debug!(
        format = %req.format,
        markdown_bytes = req.markdown.len(),
        "conversion requested"
    );

    let document = state.converter.convert(&req.markdown, req.format).await?;
    Ok(attachment(document))
}

fn attachment(document: ConvertedDocument) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", document.filename());
    (
        [
            (header::CONTENT_TYPE, document.content_type().to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.into_bytes(),
    )
        .into_response()
}
