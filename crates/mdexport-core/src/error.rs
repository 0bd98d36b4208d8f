use thiserror::Error;

/// Every way a conversion can fail.
///
/// The display strings are returned verbatim to HTTP callers, so they carry
/// the converter's own diagnostics rather than a generic message.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The converter binary could not be started (missing, not executable, ...).
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Feeding stdin or collecting the output of a running converter failed.
    #[error("Failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The converter ran and exited unsuccessfully.
    ///
    /// `code` is `-1` when the process was terminated by a signal.
    #[error("Pandoc error (code {code}): {stderr}")]
    Exit { code: i32, stderr: String },

    /// The configured conversion deadline elapsed; the child has been killed.
    #[error("conversion timed out after {limit:?}")]
    Timeout { limit: std::time::Duration },

    /// The concurrency limiter was closed while waiting for a permit.
    #[error("conversion limiter closed")]
    LimiterClosed,
}
