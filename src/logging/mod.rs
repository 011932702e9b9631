//! Logging setup for the engine binaries.
//!
//! Production environments get structured JSON lines; everything else gets
//! colored human-readable output. All logs go to stderr, leaving stdout to
//! the evaluation output.

use crate::config::get_environment;
use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` wins when set to a known value, otherwise `APP_ENV` decides.
    pub fn detect(app_env: &str, log_format: Option<&str>) -> LogFormat {
        match log_format.map(|f| f.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | Some("text") => LogFormat::Pretty,
            _ if matches!(app_env, "production" | "prod") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` filters, default `info`.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging() {
    let log_format = env::var("LOG_FORMAT").ok();
    let format = LogFormat::detect(&get_environment(), log_format.as_deref());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}
