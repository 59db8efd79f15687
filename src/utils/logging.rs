//! Structured logging and secret-scrubbing utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing helpers that keep
//! provider keys and bearer tokens out of logs and error payloads.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Logs are written to stderr so the stdio tool transport owns stdout.
/// `RUST_LOG` takes precedence over `LoggingConfig::level`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

/// Redacts provider keys and bearer tokens from a message.
///
/// Handles the `key=<value>` query parameter used by AMap and
/// `Bearer <token>` authorization values.
pub fn sanitize(input: &str) -> String {
    let result = redact_after(input, "key=", "[REDACTED_KEY]");
    redact_after(&result, "Bearer ", "[REDACTED_TOKEN]")
}

fn redact_after(input: &str, marker: &str, placeholder: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(marker) {
        let value_start = pos + marker.len();
        result.push_str(&rest[..value_start]);

        let tail = &rest[value_start..];
        let end = tail
            .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\'' | ')'))
            .unwrap_or(tail.len());
        if end > 0 {
            result.push_str(placeholder);
        }
        rest = &tail[end..];
    }

    result.push_str(rest);
    result
}

/// First four characters of a secret followed by `...`.
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    format!("{}...", prefix)
}
