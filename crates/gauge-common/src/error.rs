//! Error types for the ACMG gauge.
//!
//! Unrecognized labels are never errors: they are reported back in the
//! gauge's `unknown_labels`. The errors here cover the boundary around the
//! aggregator:
//! - Input documents with the wrong shape
//! - Configuration discovery and parsing
//! - I/O and serialization
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Invalid Input Kind
//!   Reason: invalid input kind at labels[2]: expected string or null, found number
//!   Fix: Pass labels as a JSON array of strings (null entries are allowed).
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 10,
//!   "category": "input",
//!   "message": "invalid input kind at labels[2]: expected string or null, found number",
//!   "recoverable": true,
//!   "suggested_action": "fix_input",
//!   "context": { "at": "labels[2]", "found": "number" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for gauge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Caller-supplied label documents.
    Input,
    /// Configuration file errors.
    Config,
    /// File I/O and serialization errors.
    Io,
    /// CLI usage errors that clap cannot catch (e.g. unknown schema name).
    Usage,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Usage => write!(f, "usage"),
        }
    }
}

/// Suggested actions for agents to take in response to errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Correct the input document and resubmit.
    FixInput,
    /// Fix or remove the configuration file.
    ResetConfig,
    /// Retry the operation.
    Retry,
    /// List the available schema types.
    ListSchemas,
    /// Manual intervention required.
    ManualIntervention,
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedAction::FixInput => write!(f, "fix_input"),
            SuggestedAction::ResetConfig => write!(f, "reset_config"),
            SuggestedAction::Retry => write!(f, "retry"),
            SuggestedAction::ListSchemas => write!(f, "list_schemas"),
            SuggestedAction::ManualIntervention => write!(f, "manual_intervention"),
        }
    }
}

/// Unified error type for the gauge.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors (10-19)
    #[error("invalid input kind at {at}: expected {expected}, found {found}")]
    InvalidInputKind {
        at: String,
        expected: &'static str,
        found: String,
    },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    // Configuration errors (20-29)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid config file {path}: {message}")]
    InvalidConfig { path: String, message: String },

    // I/O errors (30-39)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Usage errors (40-49)
    #[error("unknown schema type: {0}")]
    UnknownSchema(String),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Input errors
    /// - 20-29: Configuration errors
    /// - 30-39: I/O errors
    /// - 40-49: Usage errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidInputKind { .. } => 10,
            Error::MalformedInput(_) => 11,
            Error::Config(_) => 20,
            Error::InvalidConfig { .. } => 21,
            Error::Io(_) => 30,
            Error::Json(_) => 31,
            Error::UnknownSchema(_) => 40,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidInputKind { .. } | Error::MalformedInput(_) => ErrorCategory::Input,
            Error::Config(_) | Error::InvalidConfig { .. } => ErrorCategory::Config,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
            Error::UnknownSchema(_) => ErrorCategory::Usage,
        }
    }

    /// Returns whether this error is potentially recoverable by the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::InvalidInputKind { .. } => true,
            Error::MalformedInput(_) => true,
            Error::Config(_) => true,
            Error::InvalidConfig { .. } => true,
            Error::Io(_) => true,
            // Output serialization failing is a bug, not a caller problem
            Error::Json(_) => false,
            Error::UnknownSchema(_) => true,
        }
    }

    /// Returns the suggested action for agents.
    pub fn suggested_action(&self) -> SuggestedAction {
        match self {
            Error::InvalidInputKind { .. } | Error::MalformedInput(_) => SuggestedAction::FixInput,
            Error::Config(_) | Error::InvalidConfig { .. } => SuggestedAction::ResetConfig,
            Error::Io(_) => SuggestedAction::Retry,
            Error::Json(_) => SuggestedAction::ManualIntervention,
            Error::UnknownSchema(_) => SuggestedAction::ListSchemas,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::InvalidInputKind { .. } => {
                "Pass labels as a JSON array of strings (null entries are allowed)."
            }
            Error::MalformedInput(_) => {
                "Check the input syntax with 'jq . <file>', or use '--input-kind lines' for plain text."
            }
            Error::Config(_) => {
                "Check the path given via --config or GAUGE_CONFIG, or run 'gauge config show'."
            }
            Error::InvalidConfig { .. } => {
                "Fix the offending key in config.toml or delete the file to use built-in defaults."
            }
            Error::Io(_) => "Check that the input file exists and is readable, then retry.",
            Error::Json(_) => "Output serialization failed. Please report this as a bug.",
            Error::UnknownSchema(_) => "Run 'gauge schema --list' to see available schema types.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::InvalidInputKind { .. } => "Invalid Input Kind",
            Error::MalformedInput(_) => "Malformed Input",
            Error::Config(_) => "Configuration Error",
            Error::InvalidConfig { .. } => "Invalid Configuration",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Serialization Error",
            Error::UnknownSchema(_) => "Unknown Schema Type",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Suggested action for agents.
    pub suggested_action: SuggestedAction,

    /// Additional structured context (e.g. offending index, config file).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::InvalidInputKind { at, found, .. } => {
                context.insert("at".to_string(), serde_json::json!(at));
                context.insert("found".to_string(), serde_json::json!(found));
            }
            Error::InvalidConfig { path, .. } => {
                context.insert("path".to_string(), serde_json::json!(path));
            }
            Error::UnknownSchema(name) => {
                context.insert("schema".to_string(), serde_json::json!(name));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
