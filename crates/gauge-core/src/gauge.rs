//! Worst-case aggregation of ACMG labels into a gauge.
//!
//! The gauge is driven by the single most severe recognized label:
//!
//! - Empty input is "no risk observed": green, severity 0.
//! - Non-empty input with no recognized label is "uncertain": yellow with no
//!   severity or score.
//! - Otherwise the max severity decides the color (`<=1` green, `2` yellow,
//!   `>=3` red) and the score is `max / 4`.
//!
//! Labels that are not in the severity table (including null entries) never
//! affect the max and are returned verbatim in `unknown_labels`.

use crate::severity::{self, AcmgClass, MAX_SEVERITY};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Three-tier gauge color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GaugeColor {
    /// Benign or likely benign at worst.
    Green,
    /// Uncertain significance at worst, or nothing recognized.
    Yellow,
    /// Likely pathogenic or pathogenic present.
    Red,
}

impl GaugeColor {
    /// Color for a recognized max severity.
    pub fn from_severity(severity: u8) -> Self {
        match severity {
            0 | 1 => GaugeColor::Green,
            2 => GaugeColor::Yellow,
            _ => GaugeColor::Red,
        }
    }

    /// Short interpretation of the color for reports.
    pub fn interpretation(&self) -> &'static str {
        match self {
            GaugeColor::Green => "Low risk: all variants are benign or likely benign",
            GaugeColor::Yellow => {
                "Moderate risk: contains variants of uncertain significance or unrecognized labels"
            }
            GaugeColor::Red => "High risk: contains likely pathogenic or pathogenic variants",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GaugeColor::Green => "green",
            GaugeColor::Yellow => "yellow",
            GaugeColor::Red => "red",
        }
    }
}

impl std::fmt::Display for GaugeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregate gauge for one list of labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GaugeResult {
    /// Gauge color.
    pub color: GaugeColor,
    /// Highest recognized severity (0-4); null when nothing was recognized.
    pub max_severity: Option<u8>,
    /// `max_severity / 4`; null when nothing was recognized.
    pub normalized_score: Option<f64>,
    /// Inputs not found in the severity table, in input order.
    pub unknown_labels: Vec<Option<String>>,
}

impl GaugeResult {
    /// Result for an empty label list.
    pub fn empty() -> Self {
        GaugeResult {
            color: GaugeColor::Green,
            max_severity: Some(0),
            normalized_score: Some(0.0),
            unknown_labels: Vec::new(),
        }
    }

    /// Result when labels were given but none was recognized.
    pub fn unrecognized(unknown_labels: Vec<Option<String>>) -> Self {
        GaugeResult {
            color: GaugeColor::Yellow,
            max_severity: None,
            normalized_score: None,
            unknown_labels,
        }
    }

    /// Result for a recognized max severity.
    pub fn from_max(max_severity: u8, unknown_labels: Vec<Option<String>>) -> Self {
        let max_severity = max_severity.min(MAX_SEVERITY);
        GaugeResult {
            color: GaugeColor::from_severity(max_severity),
            max_severity: Some(max_severity),
            normalized_score: Some(f64::from(max_severity) / f64::from(MAX_SEVERITY)),
            unknown_labels,
        }
    }

    /// Class attaining the max severity, if any label was recognized.
    pub fn worst_class(&self) -> Option<AcmgClass> {
        self.max_severity.and_then(AcmgClass::from_severity)
    }

    /// Canonical label of the worst class, or `"unknown"`.
    pub fn variant_status(&self) -> &'static str {
        self.worst_class().map(|c| c.label()).unwrap_or("unknown")
    }
}

/// Aggregate labels (null entries allowed) into a worst-case gauge.
///
/// # Examples
///
/// ```
/// use gauge_core::gauge::{aggregate, GaugeColor};
///
/// let result = aggregate([Some("benign"), None, Some("Likely Pathogenic")]);
/// assert_eq!(result.color, GaugeColor::Red);
/// assert_eq!(result.max_severity, Some(3));
/// assert_eq!(result.unknown_labels, vec![None]);
/// ```
pub fn aggregate<I, S>(labels: I) -> GaugeResult
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut total = 0usize;
    let mut max: Option<u8> = None;
    let mut unknown = Vec::new();

    for raw in labels {
        total += 1;
        match raw {
            None => unknown.push(None),
            Some(raw) => match severity::severity_of(raw.as_ref()) {
                Some(sev) => max = Some(max.map_or(sev, |m| m.max(sev))),
                None => unknown.push(Some(raw.as_ref().to_string())),
            },
        }
    }

    let result = if total == 0 {
        GaugeResult::empty()
    } else {
        match max {
            Some(max) => GaugeResult::from_max(max, unknown),
            None => GaugeResult::unrecognized(unknown),
        }
    };

    tracing::debug!(
        target: "gauge_core::gauge",
        total,
        unknown = result.unknown_labels.len(),
        max_severity = result.max_severity,
        color = %result.color,
        "gauge computed"
    );

    result
}

/// Aggregate labels that are known to be present (no null entries).
pub fn aggregate_labels<I, S>(labels: I) -> GaugeResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aggregate(labels.into_iter().map(Some))
}

/// Named list of labels, e.g. the variants of one report category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LabelGroup {
    pub name: String,
    pub labels: Vec<Option<String>>,
}

impl LabelGroup {
    pub fn new(name: impl Into<String>, labels: Vec<Option<String>>) -> Self {
        LabelGroup {
            name: name.into(),
            labels,
        }
    }
}

/// Gauge for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GroupGauge {
    /// Group name as given.
    pub name: String,
    /// Number of entries in the group, unknown and null included.
    pub label_count: usize,
    /// Canonical label of the worst recognized class, or "unknown".
    pub variant_status: String,
    pub gauge: GaugeResult,
}

/// Per-group gauges plus the worst case across every group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GroupedGauge {
    /// Gauges in input group order.
    pub groups: Vec<GroupGauge>,
    /// Gauge over all groups' labels concatenated in group order.
    pub overall: GaugeResult,
}

/// Aggregate each group independently and all groups together.
pub fn aggregate_groups(groups: &[LabelGroup]) -> GroupedGauge {
    let per_group = groups
        .iter()
        .map(|group| {
            let gauge = aggregate(group.labels.iter().map(Option::as_deref));
            GroupGauge {
                name: group.name.clone(),
                label_count: group.labels.len(),
                variant_status: gauge.variant_status().to_string(),
                gauge,
            }
        })
        .collect();

    let overall = aggregate(
        groups
            .iter()
            .flat_map(|group| group.labels.iter().map(Option::as_deref)),
    );

    GroupedGauge {
        groups: per_group,
        overall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> GaugeResult {
        aggregate_labels(items.iter().copied())
    }

    #[test]
    fn test_empty_is_green_zero() {
        let result = aggregate(Vec::<Option<&str>>::new());
        assert_eq!(result, GaugeResult::empty());
        assert_eq!(result.color, GaugeColor::Green);
        assert_eq!(result.max_severity, Some(0));
        assert_eq!(result.normalized_score, Some(0.0));
        assert!(result.unknown_labels.is_empty());
    }

    #[test]
    fn test_benign_and_likely_benign_is_green() {
        let result = labels(&["benign", "likely benign"]);
        assert_eq!(result.color, GaugeColor::Green);
        assert_eq!(result.max_severity, Some(1));
        assert_eq!(result.normalized_score, Some(0.25));
        assert!(result.unknown_labels.is_empty());
    }

    #[test]
    fn test_uncertain_significance_is_yellow() {
        let result = labels(&["benign", "uncertain significance"]);
        assert_eq!(result.color, GaugeColor::Yellow);
        assert_eq!(result.max_severity, Some(2));
        assert_eq!(result.normalized_score, Some(0.5));
    }

    #[test]
    fn test_likely_pathogenic_is_red() {
        let result = labels(&["benign", "likely pathogenic"]);
        assert_eq!(result.color, GaugeColor::Red);
        assert_eq!(result.max_severity, Some(3));
        assert_eq!(result.normalized_score, Some(0.75));
    }

    #[test]
    fn test_pathogenic_overrides_benign() {
        let result = labels(&["benign", "benign", "pathogenic"]);
        assert_eq!(result.color, GaugeColor::Red);
        assert_eq!(result.max_severity, Some(4));
        assert_eq!(result.normalized_score, Some(1.0));
        assert!(result.unknown_labels.is_empty());
    }

    #[test]
    fn test_unknown_labels_tracked_separately() {
        let result = labels(&["benign", "unknown_label", "vus"]);
        assert_eq!(result.color, GaugeColor::Yellow);
        assert_eq!(result.max_severity, Some(2));
        assert_eq!(result.normalized_score, Some(0.5));
        assert_eq!(result.unknown_labels, vec![Some("unknown_label".to_string())]);
    }

    #[test]
    fn test_all_unknown_is_yellow_without_score() {
        let result = labels(&["foo", "bar"]);
        assert_eq!(result.color, GaugeColor::Yellow);
        assert_eq!(result.max_severity, None);
        assert_eq!(result.normalized_score, None);
        assert_eq!(
            result.unknown_labels,
            vec![Some("foo".to_string()), Some("bar".to_string())]
        );
    }

    #[test]
    fn test_null_entries_are_unknown_and_kept_in_order() {
        let result = aggregate([None, Some("mystery"), None, Some("benign")]);
        assert_eq!(result.color, GaugeColor::Green);
        assert_eq!(result.max_severity, Some(0));
        assert_eq!(
            result.unknown_labels,
            vec![None, Some("mystery".to_string()), None]
        );
    }

    #[test]
    fn test_only_nulls_is_unrecognized() {
        let result = aggregate([None::<&str>, None]);
        assert_eq!(result, GaugeResult::unrecognized(vec![None, None]));
    }

    #[test]
    fn test_unknown_labels_keep_original_text() {
        let result = labels(&["  Mystery ", ""]);
        assert_eq!(
            result.unknown_labels,
            vec![Some("  Mystery ".to_string()), Some(String::new())]
        );
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(labels(&["  Pathogenic "]), labels(&["pathogenic"]));
        assert_eq!(labels(&["VUS"]), labels(&["uncertain significance"]));
    }

    #[test]
    fn test_color_thresholds() {
        assert_eq!(GaugeColor::from_severity(0), GaugeColor::Green);
        assert_eq!(GaugeColor::from_severity(1), GaugeColor::Green);
        assert_eq!(GaugeColor::from_severity(2), GaugeColor::Yellow);
        assert_eq!(GaugeColor::from_severity(3), GaugeColor::Red);
        assert_eq!(GaugeColor::from_severity(4), GaugeColor::Red);
    }

    #[test]
    fn test_variant_status() {
        assert_eq!(labels(&["vus", "benign"]).variant_status(), "uncertain significance");
        assert_eq!(labels(&["nope"]).variant_status(), "unknown");
        assert_eq!(GaugeResult::empty().variant_status(), "benign");
    }

    #[test]
    fn test_result_serialization_shape() {
        let json = serde_json::to_value(aggregate([Some("foo"), None])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "color": "yellow",
                "max_severity": null,
                "normalized_score": null,
                "unknown_labels": ["foo", null],
            })
        );
    }

    #[test]
    fn test_grouped_gauges() {
        let groups = vec![
            LabelGroup::new("cardio", vec![Some("benign".into()), Some("vus".into())]),
            LabelGroup::new("onco", vec![Some("pathogenic".into()), None]),
            LabelGroup::new("empty", vec![]),
        ];
        let grouped = aggregate_groups(&groups);

        assert_eq!(grouped.groups.len(), 3);
        assert_eq!(grouped.groups[0].name, "cardio");
        assert_eq!(grouped.groups[0].gauge.color, GaugeColor::Yellow);
        assert_eq!(grouped.groups[0].variant_status, "uncertain significance");
        assert_eq!(grouped.groups[1].gauge.color, GaugeColor::Red);
        assert_eq!(grouped.groups[1].label_count, 2);
        assert_eq!(grouped.groups[1].gauge.unknown_labels, vec![None]);
        assert_eq!(grouped.groups[2].gauge, GaugeResult::empty());

        assert_eq!(grouped.overall.color, GaugeColor::Red);
        assert_eq!(grouped.overall.max_severity, Some(4));
        assert_eq!(grouped.overall.unknown_labels, vec![None]);
    }

    #[test]
    fn test_no_groups_is_empty_overall() {
        let grouped = aggregate_groups(&[]);
        assert!(grouped.groups.is_empty());
        assert_eq!(grouped.overall, GaugeResult::empty());
    }
}
