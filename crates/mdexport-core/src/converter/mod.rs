//! Conversion seam shared by the HTTP layer and the pandoc backend.

pub mod pandoc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ConversionError;
use crate::format::ConversionFormat;

/// Turns markdown text into a document of the requested format.
///
/// Implementations must return either the complete output or an error; there
/// is no partial-result mode.
#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(
        &self,
        markdown: &str,
        format: ConversionFormat,
    ) -> Result<ConvertedDocument, ConversionError>;
}

/// Bytes produced by a successful conversion, tagged with their format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDocument {
    format: ConversionFormat,
    bytes: Bytes,
}

impl ConvertedDocument {
    pub fn new(format: ConversionFormat, bytes: impl Into<Bytes>) -> Self {
        Self {
            format,
            bytes: bytes.into(),
        }
    }

    pub fn format(&self) -> ConversionFormat {
        self.format
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn filename(&self) -> String {
        self.format.attachment_filename()
    }
}
