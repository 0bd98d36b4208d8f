use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

use crate::error::ServerError;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Small JSON bodies are logged in full at debug level; anything else only by size.
const BODY_LOG_LIMIT: usize = 1024;

/// Wraps every request in an `http_request` span and tags both directions
/// with an `x-trace-id` header.
///
/// An incoming `x-trace-id` is reused when it is a valid UUID, otherwise a
/// fresh v4 id is generated.
pub async fn trace_middleware(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    let trace_header = HeaderValue::from_str(&trace_id.to_string()).ok();

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        let (parts, body) = req.into_parts();

        let req_bytes = match buffer_and_log("request", &parts.headers, body).await {
            Some(bytes) => bytes,
            None => {
                return ServerError::Validation {
                    status: StatusCode::BAD_REQUEST,
                    message: "failed to read request body".to_owned(),
                }
                .into_response();
            }
        };
        let mut req = Request::from_parts(parts, Body::from(req_bytes));
        if let Some(value) = &trace_header {
            req.headers_mut().insert(X_TRACE_ID, value.clone());
        }

        let response = next.run(req).await;
        let (parts, body) = response.into_parts();

        let mut response = match buffer_and_log("response", &parts.headers, body).await {
            Some(bytes) => Response::from_parts(parts, Body::from(bytes)),
            None => ServerError::Internal("failed to buffer response body".to_owned())
                .into_response(),
        };
        if let Some(value) = trace_header {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// Collects a body, logging it when it is small JSON. `None` if the body errored.
async fn buffer_and_log(direction: &str, headers: &HeaderMap, body: Body) -> Option<Bytes> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let is_json = content_type.contains("application/json");

    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            debug!(direction, error = %e, "failed to buffer body");
            return None;
        }
    };

    if is_json && bytes.len() < BODY_LOG_LIMIT {
        if let Ok(text) = std::str::from_utf8(&bytes) {
            debug!("{} body: {}", direction, text);
        }
    } else if !bytes.is_empty() {
        debug!(
            "{} body: [skipped: type={}, size={}]",
            direction,
            content_type,
            bytes.len()
        );
    }

    Some(bytes)
}
