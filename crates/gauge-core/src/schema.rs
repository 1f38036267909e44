//! JSON Schema generation for gauge output types.
//!
//! ```bash
//! gauge schema --list
//! gauge schema GaugeResult
//! ```

use crate::gauge::{GaugeColor, GaugeResult, GroupGauge, GroupedGauge, LabelGroup};
use crate::severity::AcmgClass;
use gauge_common::{Error, Result};
use schemars::schema_for;
use serde_json::Value;

/// Available schema types with their descriptions.
pub fn available_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        ("GaugeResult", "Worst-case gauge for one list of labels"),
        ("GaugeColor", "Gauge color (green, yellow, red)"),
        ("AcmgClass", "ACMG/AMP variant classification"),
        ("LabelGroup", "Named list of labels accepted by 'gauge batch'"),
        ("GroupGauge", "Gauge for one named group"),
        ("GroupedGauge", "Per-group gauges plus the overall worst case"),
    ]
}

/// Generate JSON Schema for a type by name.
pub fn schema_for_type(name: &str) -> Result<Value> {
    let schema = match name {
        "GaugeResult" => schema_for!(GaugeResult),
        "GaugeColor" => schema_for!(GaugeColor),
        "AcmgClass" => schema_for!(AcmgClass),
        "LabelGroup" => schema_for!(LabelGroup),
        "GroupGauge" => schema_for!(GroupGauge),
        "GroupedGauge" => schema_for!(GroupedGauge),
        _ => return Err(Error::UnknownSchema(name.to_string())),
    };
    Ok(serde_json::to_value(schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_schema_generates() {
        for (name, _) in available_schemas() {
            let schema = schema_for_type(name).unwrap();
            assert!(schema.is_object(), "{name} schema should be an object");
        }
    }

    #[test]
    fn test_gauge_result_schema_fields() {
        let schema = schema_for_type("GaugeResult").unwrap();
        let props = schema["properties"].as_object().unwrap();
        for field in ["color", "max_severity", "normalized_score", "unknown_labels"] {
            assert!(props.contains_key(field), "missing {field}");
        }
    }

    #[test]
    fn test_unknown_schema() {
        let err = schema_for_type("Plan").unwrap_err();
        assert!(matches!(err, Error::UnknownSchema(ref n) if n == "Plan"));
    }
}
