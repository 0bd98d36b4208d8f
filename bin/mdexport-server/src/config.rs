//! Server configuration, parsed once at startup from CLI flags and environment
//! variables.
//!
//! Every field has a default so the server starts without any flag or
//! variable set. The resulting [`Config`] is handed to [`crate::state::AppState`]
//! by value; nothing reads the environment after startup.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, builder::BoolishValueParser};
use mdexport_core::PandocConfig;

/// Runtime configuration for mdexport-server.
#[derive(Debug, Clone, Parser)]
#[command(name = "mdexport-server", version, about = "Markdown to md/docx/pdf conversion service")]
pub struct Config {
    /// TCP address to bind.
    #[arg(long = "bind", env = "MDEXPORT_BIND", default_value = "0.0.0.0:8000")]
    pub bind_address: SocketAddr,

    /// Comma-separated list of allowed CORS origins. Empty allows any origin.
    #[arg(long = "cors-origins", env = "CORS_ORIGINS", value_name = "ORIGINS")]
    pub cors_origins: Option<String>,

    /// Converter executable (looked up on `PATH` unless absolute).
    #[arg(long = "pandoc-bin", env = "MDEXPORT_PANDOC_BIN", default_value = "pandoc")]
    pub pandoc_bin: PathBuf,

    /// Cap on converter processes running at once. Unbounded when unset.
    #[arg(long = "max-concurrent-conversions", env = "MDEXPORT_MAX_CONCURRENT")]
    pub max_concurrent_conversions: Option<NonZeroUsize>,

    /// Per-conversion deadline in seconds. No deadline when unset.
    #[arg(long = "conversion-timeout-secs", env = "MDEXPORT_CONVERSION_TIMEOUT_SECS")]
    pub conversion_timeout_secs: Option<u64>,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    /// `RUST_LOG` takes precedence when set.
    #[arg(long = "log", env = "MDEXPORT_LOG", default_value = "info")]
    pub log_level: String,

    /// Emit log records as newline-delimited JSON.
    #[arg(
        long = "log-json",
        env = "MDEXPORT_LOG_JSON",
        value_name = "BOOL",
        action = ArgAction::Set,
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: bool,

    /// Also write logs to a daily-rotated file in this directory.
    #[arg(long = "log-dir", env = "MDEXPORT_LOG_DIR", value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    /// Serve the OpenAPI document, Swagger UI and ReDoc.
    #[arg(
        long = "enable-docs",
        env = "MDEXPORT_ENABLE_DOCS",
        value_name = "BOOL",
        action = ArgAction::Set,
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    pub enable_docs: bool,
}

impl Config {
    /// Trimmed, non-empty entries of [`Config::cors_origins`].
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }

    pub fn pandoc_config(&self) -> PandocConfig {
        PandocConfig {
            program: self.pandoc_bin.clone(),
            max_concurrent: self.max_concurrent_conversions,
            timeout: self.conversion_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Config {
        let argv = std::iter::once("mdexport-server").chain(args.iter().copied());
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse(&[
            "--bind",
            "127.0.0.1:9000",
            "--pandoc-bin",
            "/opt/pandoc/bin/pandoc",
            "--max-concurrent-conversions",
            "4",
            "--conversion-timeout-secs",
            "30",
            "--log-json",
            "true",
            "--enable-docs",
            "off",
        ]);

        assert_eq!(cfg.bind_address, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert!(cfg.log_json);
        assert!(!cfg.enable_docs);

        let pandoc = cfg.pandoc_config();
        assert_eq!(pandoc.program, PathBuf::from("/opt/pandoc/bin/pandoc"));
        assert_eq!(pandoc.max_concurrent, NonZeroUsize::new(4));
        assert_eq!(pandoc.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let argv = ["mdexport-server", "--max-concurrent-conversions", "0"];
        assert!(Config::try_parse_from(argv).is_err());
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let cfg = parse(&[
            "--cors-origins",
            " https://a.example.com, ,https://b.example.com ,",
        ]);
        assert_eq!(
            cfg.cors_origins_list(),
            vec!["https://a.example.com", "https://b.example.com"]
        );

        assert!(parse(&[]).cors_origins_list().is_empty());
        assert!(parse(&["--cors-origins", " , "]).cors_origins_list().is_empty());
    }
}
