//! ACMG Gauge Core Library
//!
//! Worst-case aggregation of ACMG/AMP variant classifications into a
//! three-color gauge:
//! - Severity table and label normalization
//! - Aggregation of one label list, or of named groups
//! - Input-boundary parsing for JSON and plain-text documents
//! - Rendering, configuration, logging, and exit codes for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod exit_codes;
pub mod gauge;
pub mod input;
pub mod logging;
pub mod output;
pub mod schema;
pub mod severity;

pub use gauge::{
    aggregate, aggregate_groups, aggregate_labels, GaugeColor, GaugeResult, GroupGauge,
    GroupedGauge, LabelGroup,
};
pub use severity::{canonical_label, classify_label, severity_of, AcmgClass, MAX_SEVERITY};
