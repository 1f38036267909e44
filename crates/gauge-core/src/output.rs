//! Rendering of gauge results in every supported output format.
//!
//! Machine formats (json, jsonl) carry the gauge fields at the top level of
//! the document, stamped with [`SCHEMA_VERSION`]. Human formats (md, summary,
//! prose) add the variant status and interpretation text.

use crate::gauge::{GaugeColor, GaugeResult, GroupGauge, GroupedGauge};
use crate::severity::{self, AcmgClass};
use gauge_common::{OutputFormat, Result, SCHEMA_VERSION};
use serde::Serialize;

/// Machine-readable document for `gauge classify`.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyReport<'a> {
    pub schema_version: &'static str,
    pub input_count: usize,
    pub variant_status: &'static str,
    pub interpretation: &'static str,
    #[serde(flatten)]
    pub gauge: &'a GaugeResult,
}

impl<'a> ClassifyReport<'a> {
    pub fn new(gauge: &'a GaugeResult, input_count: usize) -> Self {
        ClassifyReport {
            schema_version: SCHEMA_VERSION,
            input_count,
            variant_status: gauge.variant_status(),
            interpretation: gauge.color.interpretation(),
            gauge,
        }
    }
}

/// Machine-readable document for `gauge batch`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport<'a> {
    pub schema_version: &'static str,
    pub groups: &'a [GroupGauge],
    pub overall: ClassifyReport<'a>,
}

#[derive(Serialize)]
struct OverallLine<'a> {
    overall: ClassifyReport<'a>,
}

#[derive(Debug, Clone, Serialize)]
struct TableRow {
    label: &'static str,
    class: AcmgClass,
    severity: u8,
    alias: bool,
}

fn display_label(label: &Option<String>) -> String {
    match label {
        Some(s) => format!("{:?}", s),
        None => "null".to_string(),
    }
}

fn display_unknown(unknown: &[Option<String>]) -> String {
    unknown
        .iter()
        .map(display_label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escape text for a single Markdown table cell.
fn md_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn display_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

fn display_score(score: Option<f64>) -> String {
    score.map_or_else(|| "N/A".to_string(), |s| format!("{:.2}", s))
}

/// Render the result of `gauge classify`.
pub fn render_gauge(gauge: &GaugeResult, input_count: usize, format: OutputFormat) -> Result<String> {
    let report = ClassifyReport::new(gauge, input_count);
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Jsonl => serde_json::to_string(&report)?,
        OutputFormat::Md => {
            let mut out = String::from("# Pathogenicity Gauge\n\n| Field | Value |\n|---|---|\n");
            out.push_str(&format!("| Color | {} |\n", gauge.color));
            out.push_str(&format!(
                "| Max severity | {} ({}) |\n",
                display_opt(gauge.max_severity),
                gauge.variant_status()
            ));
            out.push_str(&format!(
                "| Normalized score | {} |\n",
                display_score(gauge.normalized_score)
            ));
            out.push_str(&format!("| Labels | {} |\n", input_count));
            out.push_str(&format!(
                "| Unknown labels | {} |\n",
                if gauge.unknown_labels.is_empty() {
                    "none".to_string()
                } else {
                    md_cell(&display_unknown(&gauge.unknown_labels))
                }
            ));
            out.push_str(&format!("\n{}\n", gauge.color.interpretation()));
            out
        }
        OutputFormat::Summary => format!(
            "{} severity={} ({}) score={} labels={} unknown={}",
            gauge.color.name().to_uppercase(),
            display_opt(gauge.max_severity),
            gauge.variant_status(),
            display_score(gauge.normalized_score),
            input_count,
            gauge.unknown_labels.len()
        ),
        OutputFormat::Prose => {
            let mut out = String::from("GAUGE RESULT\n");
            out.push_str(&format!("Color: {}\n", gauge.color.name().to_uppercase()));
            out.push_str(&format!(
                "Max Severity: {} ({})\n",
                display_opt(gauge.max_severity),
                gauge.variant_status()
            ));
            out.push_str(&format!(
                "Normalized Score: {}\n",
                display_score(gauge.normalized_score)
            ));
            if !gauge.unknown_labels.is_empty() {
                out.push_str(&format!(
                    "Unknown Labels: {}\n",
                    display_unknown(&gauge.unknown_labels)
                ));
            }
            out.push_str(&format!("\nInterpretation:\n- {}\n", gauge.color.interpretation()));
            out
        }
    };
    Ok(out)
}

/// Render the result of `gauge batch`.
pub fn render_grouped(grouped: &GroupedGauge, format: OutputFormat) -> Result<String> {
    let total: usize = grouped.groups.iter().map(|g| g.label_count).sum();
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&BatchReport {
            schema_version: SCHEMA_VERSION,
            groups: &grouped.groups,
            overall: ClassifyReport::new(&grouped.overall, total),
        })?,
        OutputFormat::Jsonl => {
            let mut lines = Vec::with_capacity(grouped.groups.len() + 1);
            for group in &grouped.groups {
                lines.push(serde_json::to_string(group)?);
            }
            lines.push(serde_json::to_string(&OverallLine {
                overall: ClassifyReport::new(&grouped.overall, total),
            })?);
            lines.join("\n")
        }
        OutputFormat::Md => {
            let mut out = String::from(
                "# Pathogenicity Gauge by Group\n\n| Group | Labels | Color | Max severity | Score | Unknown |\n|---|---|---|---|---|---|\n",
            );
            for group in &grouped.groups {
                out.push_str(&format!(
                    "| {} | {} | {} | {} ({}) | {} | {} |\n",
                    md_cell(&group.name),
                    group.label_count,
                    group.gauge.color,
                    display_opt(group.gauge.max_severity),
                    group.variant_status,
                    display_score(group.gauge.normalized_score),
                    group.gauge.unknown_labels.len()
                ));
            }
            out.push_str(&format!(
                "\n**Overall:** {} ({}), score {}\n",
                grouped.overall.color,
                grouped.overall.variant_status(),
                display_score(grouped.overall.normalized_score)
            ));
            out
        }
        OutputFormat::Summary => {
            let count = |color: GaugeColor| {
                grouped
                    .groups
                    .iter()
                    .filter(|g| g.gauge.color == color)
                    .count()
            };
            format!(
                "{} groups={} red={} yellow={} green={} labels={}",
                grouped.overall.color.name().to_uppercase(),
                grouped.groups.len(),
                count(GaugeColor::Red),
                count(GaugeColor::Yellow),
                count(GaugeColor::Green),
                total
            )
        }
        OutputFormat::Prose => {
            let mut out = String::from("GAUGE RESULT BY GROUP\n");
            for group in &grouped.groups {
                out.push_str(&format!("  - {} ({} labels)\n", group.name, group.label_count));
                out.push_str(&format!(
                    "    Overall Status: {} ({} - score: {})\n",
                    group.variant_status,
                    group.gauge.color,
                    display_score(group.gauge.normalized_score)
                ));
                if !group.gauge.unknown_labels.is_empty() {
                    out.push_str(&format!(
                        "    Unknown Labels: {}\n",
                        display_unknown(&group.gauge.unknown_labels)
                    ));
                }
            }
            out.push_str(&format!(
                "\nOverall: {} ({})\nInterpretation:\n- {}\n",
                grouped.overall.color.name().to_uppercase(),
                grouped.overall.variant_status(),
                grouped.overall.color.interpretation()
            ));
            out
        }
    };
    Ok(out)
}

/// Render the severity table.
pub fn render_table(format: OutputFormat) -> Result<String> {
    let rows: Vec<TableRow> = severity::table_entries()
        .iter()
        .map(|&(label, class)| TableRow {
            label,
            class,
            severity: class.severity(),
            alias: label != class.label(),
        })
        .collect();

    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&rows)?,
        OutputFormat::Jsonl => rows
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?
            .join("\n"),
        OutputFormat::Md => {
            let mut out = String::from("| Label | Severity | Color |\n|---|---|---|\n");
            for row in &rows {
                let label = if row.alias {
                    format!("{} (alias)", row.label)
                } else {
                    row.label.to_string()
                };
                out.push_str(&format!(
                    "| {} | {} | {} |\n",
                    label,
                    row.severity,
                    GaugeColor::from_severity(row.severity)
                ));
            }
            out
        }
        OutputFormat::Summary | OutputFormat::Prose => rows
            .iter()
            .map(|row| format!("{}={}", row.label, row.severity))
            .collect::<Vec<_>>()
            .join(if format == OutputFormat::Summary { " " } else { "\n" }),
    };
    Ok(out)
}
