// File: crates/demo/src/logging.rs
// Summary: tracing-subscriber setup driven by RUST_LOG / LOG_LEVEL / LOG_FORMAT.

use std::env;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `LOG_LEVEL` (default `info`).
/// Logs go to stderr so stdout stays free for program output.
pub fn init_logging() -> Result<()> {
    let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));
    let format = env::var("LOG_FORMAT").map(|s| LogFormat::parse(&s)).unwrap_or_default();

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let res = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    res.map_err(|e| anyhow!("failed to initialise logging: {e}"))
}
