//! ACMG/AMP classification taxonomy and the label severity table.
//!
//! Each recognized label maps to one [`AcmgClass`], and each class carries an
//! integer severity in `0..=4`:
//!
//! | Label                    | Class                   | Severity |
//! |--------------------------|-------------------------|----------|
//! | `benign`                 | `Benign`                | 0        |
//! | `likely benign`          | `LikelyBenign`          | 1        |
//! | `uncertain significance` | `UncertainSignificance` | 2        |
//! | `vus`                    | `UncertainSignificance` | 2        |
//! | `likely pathogenic`      | `LikelyPathogenic`      | 3        |
//! | `pathogenic`             | `Pathogenic`            | 4        |
//!
//! Lookups trim surrounding whitespace and ignore case. Matching is exact:
//! `"pathogenic variant"` or `"LP"` are not recognized.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Highest severity any label can carry.
pub const MAX_SEVERITY: u8 = 4;

/// Label table, in severity order. Aliases follow their canonical label.
const LABELS: &[(&str, AcmgClass)] = &[
    ("benign", AcmgClass::Benign),
    ("likely benign", AcmgClass::LikelyBenign),
    ("uncertain significance", AcmgClass::UncertainSignificance),
    ("vus", AcmgClass::UncertainSignificance),
    ("likely pathogenic", AcmgClass::LikelyPathogenic),
    ("pathogenic", AcmgClass::Pathogenic),
];

static SEVERITY_TABLE: LazyLock<HashMap<&'static str, AcmgClass>> =
    LazyLock::new(|| LABELS.iter().copied().collect());

/// ACMG/AMP variant classification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AcmgClass {
    /// No pathogenic risk.
    Benign,
    /// Minimal pathogenic risk (<10%).
    LikelyBenign,
    /// Indeterminate risk (~50%), also reported as VUS.
    UncertainSignificance,
    /// High pathogenic risk (~90%).
    LikelyPathogenic,
    /// Very high pathogenic risk (99-100%).
    Pathogenic,
}

impl AcmgClass {
    /// All classes in ascending severity order.
    pub fn all() -> &'static [AcmgClass] {
        &[
            AcmgClass::Benign,
            AcmgClass::LikelyBenign,
            AcmgClass::UncertainSignificance,
            AcmgClass::LikelyPathogenic,
            AcmgClass::Pathogenic,
        ]
    }

    /// Severity in `0..=MAX_SEVERITY`.
    pub fn severity(&self) -> u8 {
        match self {
            AcmgClass::Benign => 0,
            AcmgClass::LikelyBenign => 1,
            AcmgClass::UncertainSignificance => 2,
            AcmgClass::LikelyPathogenic => 3,
            AcmgClass::Pathogenic => 4,
        }
    }

    /// Reverse lookup from a severity value.
    pub fn from_severity(severity: u8) -> Option<AcmgClass> {
        Self::all().get(usize::from(severity)).copied()
    }

    /// Canonical (non-alias) label for this class.
    pub fn label(&self) -> &'static str {
        match self {
            AcmgClass::Benign => "benign",
            AcmgClass::LikelyBenign => "likely benign",
            AcmgClass::UncertainSignificance => "uncertain significance",
            AcmgClass::LikelyPathogenic => "likely pathogenic",
            AcmgClass::Pathogenic => "pathogenic",
        }
    }
}

impl std::fmt::Display for AcmgClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalize a raw label for table lookup.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Look up a raw label in the severity table.
pub fn classify_label(raw: &str) -> Option<AcmgClass> {
    SEVERITY_TABLE.get(normalize_label(raw).as_str()).copied()
}

/// Severity of a raw label, if recognized.
pub fn severity_of(raw: &str) -> Option<u8> {
    classify_label(raw).map(|class| class.severity())
}

/// Canonical label for a severity value, if it is in range.
pub fn canonical_label(severity: u8) -> Option<&'static str> {
    AcmgClass::from_severity(severity).map(|class| class.label())
}

/// Every recognized label with its class, aliases included, in severity order.
pub fn table_entries() -> &'static [(&'static str, AcmgClass)] {
    LABELS
}
