//! Test doubles for driving the router without a real converter.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Bytes;
use clap::Parser;
use mdexport_core::{ConversionError, ConversionFormat, ConvertedDocument, Converter};

use crate::config::Config;
use crate::routes;
use crate::state::AppState;

type FailWith = Box<dyn Fn() -> ConversionError + Send + Sync>;

enum Outcome {
    /// Return the markdown input unchanged.
    Echo,
    Bytes(Bytes),
    Fail(FailWith),
}

/// Records every call and answers with a canned outcome.
pub struct StubConverter {
    outcome: Outcome,
    calls: AtomicUsize,
    last: Mutex<Option<(String, ConversionFormat)>>,
}

impl StubConverter {
    fn with(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn echo() -> Arc<Self> {
        Self::with(Outcome::Echo)
    }

    pub fn returning(bytes: impl Into<Bytes>) -> Arc<Self> {
        Self::with(Outcome::Bytes(bytes.into()))
    }

    pub fn failing(fail: impl Fn() -> ConversionError + Send + Sync + 'static) -> Arc<Self> {
        Self::with(Outcome::Fail(Box::new(fail)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<(String, ConversionFormat)> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl Converter for StubConverter {
    async fn convert(
        &self,
        markdown: &str,
        format: ConversionFormat,
    ) -> Result<ConvertedDocument, ConversionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((markdown.to_owned(), format));
        match &self.outcome {
            Outcome::Echo => Ok(ConvertedDocument::new(format, markdown.to_owned())),
            Outcome::Bytes(bytes) => Ok(ConvertedDocument::new(format, bytes.clone())),
            Outcome::Fail(fail) => Err(fail()),
        }
    }
}

/// Configuration with every default applied.
pub fn test_config() -> Config {
    Config::try_parse_from(["mdexport-server"]).unwrap()
}

pub fn test_app_with(config: Config, converter: Arc<dyn Converter>) -> Router {
    let state = Arc::new(AppState {
        config: Arc::new(config),
        converter,
    });
    routes::build(state)
}

pub fn test_app(converter: Arc<StubConverter>) -> Router {
    test_app_with(test_config(), converter)
}
