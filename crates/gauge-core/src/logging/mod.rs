//! Structured logging for the gauge CLI.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSONL for pipelines and agents
//!
//! # Usage
//!
//! ```ignore
//! use gauge_core::logging::{init_logging, LogConfig, event_names};
//!
//! let config = LogConfig::from_env(None, None);
//! init_logging(&config);
//!
//! let run_id = generate_run_id();
//! tracing::info!(event = event_names::CLASSIFY_STARTED, %run_id, labels = 3, "classifying");
//! ```
//!
//! stdout is reserved for command payloads; every log line goes to stderr.
//! Labels are clinical data, so they are logged as counts, never verbatim.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Stable event names, emitted as the `event` field.
pub mod event_names {
    pub const CONFIG_RESOLVED: &str = "gauge.config.resolved";
    pub const INPUT_LOADED: &str = "gauge.input.loaded";
    pub const CLASSIFY_STARTED: &str = "gauge.classify.started";
    pub const CLASSIFY_COMPLETED: &str = "gauge.classify.completed";
    pub const BATCH_COMPLETED: &str = "gauge.batch.completed";
    pub const COMMAND_FAILED: &str = "gauge.command.failed";
}

/// Crate targets the filter applies the configured level to.
const TARGETS: &[&str] = &["gauge", "gauge_core", "gauge_common"];

/// Build the filter directive string for a level.
pub fn filter_directives(level: LogLevel) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the logging subsystem.
///
/// Should be called once at startup. A second call is a no-op, so tests can
/// call it freely. The level is taken from `config` only; RUST_LOG is folded
/// into it by [`LogConfig::with_overrides`].
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::new(filter_directives(config.level));

    let result = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
        }
    };

    if result.is_err() {
        tracing::debug!("logging already initialized; keeping existing subscriber");
    }
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("run-{}", &uuid.simple().to_string()[..12])
}
