use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Output formats a conversion can target.
///
/// The serde/strum token (`md`, `docx`, `pdf`) is the wire value accepted by
/// the HTTP API and doubles as the file extension of the produced attachment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub enum ConversionFormat {
    /// Normalised markdown, as re-rendered by the converter.
    #[serde(rename = "md")]
    #[strum(serialize = "md")]
    Markdown,
    /// Office Open XML word-processing document.
    #[serde(rename = "docx")]
    #[strum(serialize = "docx")]
    WordDocument,
    #[serde(rename = "pdf")]
    #[strum(serialize = "pdf")]
    Pdf,
}

impl ConversionFormat {
    /// Writer name passed to pandoc's `-t` flag.
    ///
    /// Pandoc has no `md` writer, so markdown maps to `markdown`; every other
    /// token is passed through unchanged.
    pub fn pandoc_target(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::WordDocument => "docx",
            Self::Pdf => "pdf",
        }
    }

    /// `Content-Type` of a document in this format.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown; charset=utf-8",
            Self::WordDocument => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Pdf => "application/pdf",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::WordDocument => "docx",
            Self::Pdf => "pdf",
        }
    }

    /// File name announced in the attachment disposition, e.g. `export.pdf`.
    pub fn attachment_filename(self) -> String {
        format!("export.{}", self.extension())
    }
}
