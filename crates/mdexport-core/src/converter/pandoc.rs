//! `pandoc` child-process backend.
//!
//! Every conversion is a single spawn → write stdin → wait → read sequence:
//!
//! ```text
//! pandoc -f markdown -t <target> -o -
//! ```
//!
//! stdin is fed concurrently with draining stdout/stderr, so payloads larger
//! than a pipe buffer cannot deadlock the child. Output is buffered in full.

use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::{ConvertedDocument, Converter};
use crate::error::ConversionError;
use crate::format::ConversionFormat;

/// Settings for [`PandocConverter`].
///
/// The default invokes `pandoc` from `PATH` with no concurrency cap and no
/// deadline.
#[derive(Debug, Clone)]
pub struct PandocConfig {
    /// Converter executable, resolved through `PATH` when not absolute.
    pub program: PathBuf,
    /// Maximum number of converter processes alive at once.
    pub max_concurrent: Option<NonZeroUsize>,
    /// Deadline for a single conversion. The child is killed when it elapses.
    pub timeout: Option<Duration>,
}

impl Default for PandocConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("pandoc"),
            max_concurrent: None,
            timeout: None,
        }
    }
}

/// [`Converter`] backed by one `pandoc` process per call.
#[derive(Debug, Clone)]
pub struct PandocConverter {
    program: PathBuf,
    timeout: Option<Duration>,
    permits: Option<Arc<Semaphore>>,
}

impl PandocConverter {
    pub fn new(config: PandocConfig) -> Self {
        Self {
            program: config.program,
            timeout: config.timeout,
            permits: config
                .max_concurrent
                .map(|limit| Arc::new(Semaphore::new(limit.get()))),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// First line of `<program> --version`, e.g. `pandoc 3.1.9`.
    pub async fn version(&self) -> Result<String, ConversionError> {
        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ConversionError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if !output.status.success() {
            return Err(ConversionError::Exit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_owned())
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    fn command(&self, format: ConversionFormat) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-f", "markdown", "-t", format.pandoc_target(), "-o", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Without a deadline an abandoned request leaves the child running.
            .kill_on_drop(self.timeout.is_some());
        cmd
    }

    async fn run(
        &self,
        markdown: &str,
        format: ConversionFormat,
    ) -> Result<Bytes, ConversionError> {
        let program = self.program_name();

        let mut child = self
            .command(format)
            .spawn()
            .map_err(|source| ConversionError::Spawn {
                program: program.clone(),
                source,
            })?;
        debug!(
            program = %program,
            target = format.pandoc_target(),
            pid = ?child.id(),
            "converter spawned"
        );

        let mut stdin = child.stdin.take().ok_or_else(|| ConversionError::Io {
            program: program.clone(),
            source: std::io::Error::other("converter stdin was not captured"),
        })?;

        let feed = async move {
            let written = stdin.write_all(markdown.as_bytes()).await;
            // Closing the pipe is what tells the converter the input is complete.
            drop(stdin);
            written
        };
        let (written, output) = tokio::join!(feed, child.wait_with_output());

        let output = output.map_err(|source| ConversionError::Io {
            program: program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(ConversionError::Exit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        // A converter that exits 0 without reading all of stdin is its own business.
        if let Err(source) = written
            && source.kind() != ErrorKind::BrokenPipe
        {
            return Err(ConversionError::Io { program, source });
        }

        Ok(Bytes::from(output.stdout))
    }
}

#[async_trait]
impl Converter for PandocConverter {
    async fn convert(
        &self,
        markdown: &str,
        format: ConversionFormat,
    ) -> Result<ConvertedDocument, ConversionError> {
        let _permit = match &self.permits {
            Some(permits) => Some(
                permits
                    .acquire()
                    .await
                    .map_err(|_| ConversionError::LimiterClosed)?,
            ),
            None => None,
        };

        let started = Instant::now();
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.run(markdown, format)).await {
                Ok(result) => result,
                Err(_) => Err(ConversionError::Timeout { limit }),
            },
            None => self.run(markdown, format).await,
        };
        let elapsed_ms = started.elapsed().as_millis();

        match result {
            Ok(bytes) => {
                info!(
                    %format,
                    input_bytes = markdown.len(),
                    output_bytes = bytes.len(),
                    elapsed_ms,
                    "conversion finished"
                );
                Ok(ConvertedDocument::new(format, bytes))
            }
            Err(e) => {
                warn!(%format, error = %e, elapsed_ms, "conversion failed");
                Err(e)
            }
        }
    }
}
