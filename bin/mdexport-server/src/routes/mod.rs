//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional Swagger UI, ReDoc and OpenAPI document (disable with
//!   `MDEXPORT_ENABLE_DOCS=false`)
//! - Health route
//! - The `/convert` route

mod convert;
pub mod doc;
mod health;

use axum::{Router, middleware};
use std::sync::Arc;
use tower::ServiceBuilder;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .merge(convert::router());

    if state.config.enable_docs {
        app = app
            .merge(SwaggerUi::new("/docs").url("/openapi.json", doc::get_docs()))
            .merge(Redoc::with_url("/redoc", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(&state.config)))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}
