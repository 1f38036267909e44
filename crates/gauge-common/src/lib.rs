//! ACMG gauge common types and errors.
//!
//! This crate provides foundational types shared by the gauge binary and
//! library:
//! - The unified error type with stable codes
//! - Structured (machine-readable) error output
//! - Output format definitions
//! - Schema versioning for emitted documents

pub mod error;
pub mod output;

pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use output::OutputFormat;

/// Schema version stamped on every machine-readable document the CLI emits.
pub const SCHEMA_VERSION: &str = "1.0.0";
