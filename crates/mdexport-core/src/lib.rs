//! mdexport-core – markdown conversion through an external document converter.
//!
//! The crate exposes a single seam, the [`Converter`] trait, and its production
//! implementation [`PandocConverter`], which shells out to `pandoc` once per
//! request:
//!
//! ```rust,no_run
//! use mdexport_core::{ConversionFormat, Converter, PandocConfig, PandocConverter};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), mdexport_core::ConversionError> {
//! let converter = PandocConverter::new(PandocConfig::default());
//! let document = converter.convert("# Hello", ConversionFormat::Pdf).await?;
//! assert_eq!(document.filename(), "export.pdf");
//! # Ok(())
//! # }
//! ```

mod converter;
mod error;
mod format;

pub use converter::pandoc::{PandocConfig, PandocConverter};
pub use converter::{ConvertedDocument, Converter};
pub use error::ConversionError;
pub use format::ConversionFormat;
