//! Input boundary: turn caller documents into label lists.
//!
//! The aggregator itself never fails. Shape violations are caught here and
//! reported as [`Error::InvalidInputKind`]; text that is not valid JSON at all
//! is [`Error::MalformedInput`].

use crate::gauge::LabelGroup;
use gauge_common::{Error, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// How an input document is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InputKind {
    /// JSON array of strings/nulls, or `{"labels": [...]}`.
    #[default]
    Json,
    /// Plain text, one label per line.
    Lines,
}

/// Name of a JSON value's kind, for error messages.
fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid_kind(at: impl Into<String>, expected: &'static str, found: &Value) -> Error {
    Error::InvalidInputKind {
        at: at.into(),
        expected,
        found: kind_name(found).to_string(),
    }
}

/// Parse JSON text into a value, mapping syntax errors to `MalformedInput`.
pub fn parse_json(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| Error::MalformedInput(e.to_string()))
}

/// Extract a label list from a JSON document.
///
/// Accepts a bare array or an object with a `labels` array. Every element must
/// be a string or null.
pub fn labels_from_json(value: &Value) -> Result<Vec<Option<String>>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("labels") {
            Some(Value::Array(items)) => items,
            Some(other) => return Err(invalid_kind("labels", "array", other)),
            None => {
                return Err(Error::InvalidInputKind {
                    at: "$".to_string(),
                    expected: "array or object with \"labels\"",
                    found: "object without \"labels\"".to_string(),
                })
            }
        },
        other => return Err(invalid_kind("$", "array or object with \"labels\"", other)),
    };

    label_items(items, "labels")
}

fn label_items(items: &[Value], at: &str) -> Result<Vec<Option<String>>> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::String(s) => Ok(Some(s.clone())),
            Value::Null => Ok(None),
            other => Err(invalid_kind(format!("{}[{}]", at, idx), "string or null", other)),
        })
        .collect()
}

/// Extract named label groups from a JSON document.
///
/// Accepts `[{"name": ..., "labels": [...]}, ...]` or `{"groups": [...]}`.
pub fn groups_from_json(value: &Value) -> Result<Vec<LabelGroup>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("groups") {
            Some(Value::Array(items)) => items,
            Some(other) => return Err(invalid_kind("groups", "array", other)),
            None => {
                return Err(Error::InvalidInputKind {
                    at: "$".to_string(),
                    expected: "array or object with \"groups\"",
                    found: "object without \"groups\"".to_string(),
                })
            }
        },
        other => return Err(invalid_kind("$", "array or object with \"groups\"", other)),
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let at = format!("groups[{}]", idx);
            let obj = item
                .as_object()
                .ok_or_else(|| invalid_kind(at.clone(), "object", item))?;

            let name = match obj.get("name") {
                Some(Value::String(name)) => name.clone(),
                Some(other) => return Err(invalid_kind(format!("{}.name", at), "string", other)),
                None => return Err(invalid_kind(format!("{}.name", at), "string", &Value::Null)),
            };
            let labels = match obj.get("labels") {
                Some(Value::Array(items)) => label_items(items, &format!("{}.labels", at))?,
                Some(other) => {
                    return Err(invalid_kind(format!("{}.labels", at), "array", other))
                }
                None => {
                    return Err(invalid_kind(format!("{}.labels", at), "array", &Value::Null))
                }
            };

            Ok(LabelGroup { name, labels })
        })
        .collect()
}

/// Split plain text into labels, one per line.
///
/// Lines are kept verbatim; normalization happens during lookup. A trailing
/// newline does not produce an extra empty label.
pub fn labels_from_lines(text: &str) -> Vec<Option<String>> {
    text.lines().map(|line| Some(line.to_string())).collect()
}

/// Read a whole input source; `-` means stdin.
pub fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Decode a label document of the given kind.
pub fn decode_labels(text: &str, kind: InputKind) -> Result<Vec<Option<String>>> {
    match kind {
        InputKind::Json => labels_from_json(&parse_json(text)?),
        InputKind::Lines => Ok(labels_from_lines(text)),
    }
}
