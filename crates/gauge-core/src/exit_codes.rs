//! Exit codes for the gauge CLI.
//!
//! Exit codes communicate the gauge outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-2: Operational outcomes (the gauge color of `classify`/`batch`)
//! - 10-19: User/input errors (recoverable by user action)
//! - 20-29: Internal errors

use crate::gauge::GaugeColor;
use gauge_common::{Error, ErrorCategory};

/// Exit codes for gauge operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Operational Outcomes (0-2)
    // ========================================================================
    /// Green gauge, or a non-gauge command that succeeded
    Clean = 0,

    /// Yellow gauge: uncertain significance, or nothing recognized
    Uncertain = 1,

    /// Red gauge: likely pathogenic or pathogenic present
    HighRisk = 2,

    // ========================================================================
    // User / Input Errors (10-19)
    // ========================================================================
    /// Invalid arguments
    ArgsError = 10,

    /// Input document has the wrong shape or is not parseable
    InputError = 11,

    /// Configuration file missing or invalid
    ConfigError = 12,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Exit code carrying a gauge color.
    pub fn from_color(color: GaugeColor) -> Self {
        match color {
            GaugeColor::Green => ExitCode::Clean,
            GaugeColor::Yellow => ExitCode::Uncertain,
            GaugeColor::Red => ExitCode::HighRisk,
        }
    }

    /// Exit code for a failed command.
    pub fn from_error(err: &Error) -> Self {
        match (err, err.category()) {
            (_, ErrorCategory::Input) => ExitCode::InputError,
            (_, ErrorCategory::Config) => ExitCode::ConfigError,
            (_, ErrorCategory::Usage) => ExitCode::ArgsError,
            (Error::Io(_), _) => ExitCode::IoError,
            _ => ExitCode::InternalError,
        }
    }

    /// Stable code name, reported alongside structured errors.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::Uncertain => "OK_UNCERTAIN",
            ExitCode::HighRisk => "OK_HIGH_RISK",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::InputError => "ERR_INPUT",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.as_i32() as u8)
    }
}
