//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use mdexport_core::Converter;

use crate::config::Config;

/// State shared across all HTTP handlers.
///
/// Built once in `main` from an explicit [`Config`]; handlers see it through
/// `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (CLI/env-derived).
    pub config: Arc<Config>,
    /// Backend every `/convert` request is delegated to.
    pub converter: Arc<dyn Converter>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
