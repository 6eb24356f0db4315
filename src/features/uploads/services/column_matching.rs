//! Maps loosely labelled spreadsheet columns onto dataset fields.
//!
//! Each field has a ranked alias list. A row column is picked in three
//! passes, each trying aliases in rank order and row keys in row order:
//!
//! 1. exact key equality
//! 2. equality after [`normalize_key`]
//! 3. containment either way between normalized forms
//!
//! The first column found wins, even when its value is empty.

use serde_json::Value;
use thiserror::Error;

use crate::features::datasets::models::NewDataset;
use crate::features::uploads::services::normalizer::Row;

pub const NAME_ALIASES: &[&str] = &["Dataset Name", "name", "dataset_name", "Dataset", "Title"];
pub const DESCRIPTION_ALIASES: &[&str] = &["Description", "description", "desc", "Summary"];
pub const DISEASE_TYPE_ALIASES: &[&str] =
    &["Disease Type", "disease_type", "disease", "Disease", "Type"];
pub const SAMPLE_SIZE_ALIASES: &[&str] = &["Sample Size", "sample_size", "n", "N", "size"];
pub const DATA_ACCESSIBILITY_ALIASES: &[&str] = &[
    "Data Accessibility",
    "data_accessibility",
    "Accessibility",
    "access",
    "Access",
];
pub const WGS_AVAILABLE_ALIASES: &[&str] =
    &["WGS Available", "wgs_available", "WGS", "wgs", "WGS Available?"];
pub const IMAGING_TYPES_ALIASES: &[&str] = &["Imaging Types", "imaging_types", "Imaging", "imaging"];
pub const MODALITIES_ALIASES: &[&str] =
    &["Modalities", "modalities", "Modality", "modality", "Data Types"];

/// Why a staged row could not become a dataset. `row` is 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("Row {row}: Expected a mapping of column names to values")]
    NotAnObject { row: usize },

    #[error("Row {row}: Missing dataset name. Available columns: {columns}")]
    MissingName { row: usize, columns: String },

    #[error("Row {row}: Database error - {message}")]
    Database { row: usize, message: String },
}

/// Lower-case, drop spaces, underscores, hyphens and periods, then trim
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-' | '.'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// The value of the column that best matches `aliases`, if any
pub fn find_column<'r>(row: &'r Row, aliases: &[&str]) -> Option<&'r Value> {
    if let Some(value) = aliases.iter().find_map(|alias| row.get(*alias)) {
        return Some(value);
    }

    let normalized_row: Vec<(String, &Value)> = row
        .iter()
        .map(|(key, value)| (normalize_key(key), value))
        .collect();
    let normalized_aliases: Vec<String> = aliases.iter().map(|a| normalize_key(a)).collect();

    for alias in &normalized_aliases {
        if let Some((_, value)) = normalized_row.iter().find(|(key, _)| key == alias) {
            return Some(value);
        }
    }

    for alias in normalized_aliases.iter().filter(|a| !a.is_empty()) {
        let contained = normalized_row.iter().find(|(key, _)| {
            !key.is_empty() && (key.contains(alias.as_str()) || alias.contains(key.as_str()))
        });
        if let Some((_, value)) = contained {
            return Some(value);
        }
    }

    None
}

/// Text form of a matched value, `None` for null, empty, false or zero
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                (i != 0).then(|| i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                let f = n.as_f64().unwrap_or(0.0);
                if f == 0.0 {
                    None
                } else if f.fract() == 0.0 && f.abs() < 1e15 {
                    Some((f as i64).to_string())
                } else {
                    Some(f.to_string())
                }
            }
        }
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Resolved text for a field, empty when nothing usable matched
pub fn resolve_text(row: &Row, aliases: &[&str]) -> String {
    find_column(row, aliases)
        .and_then(render_value)
        .unwrap_or_default()
}

/// Digits of `raw` with an optional leading minus, as an i32 (0 on failure)
pub fn parse_sample_size(raw: &str) -> i32 {
    let trimmed = raw.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };

    let digits: String = rest.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }

    format!("{}{}", sign, digits).parse().unwrap_or(0)
}

/// Map one staged row onto a new dataset. `index` is 0-based.
pub fn resolve_dataset(row: &Value, index: usize) -> Result<NewDataset, RowError> {
    let row_number = index + 1;
    let row = row
        .as_object()
        .ok_or(RowError::NotAnObject { row: row_number })?;

    let name = resolve_text(row, NAME_ALIASES);
    if name.is_empty() {
        let columns = row.keys().map(String::as_str).collect::<Vec<_>>().join(", ");
        return Err(RowError::MissingName {
            row: row_number,
            columns,
        });
    }

    Ok(NewDataset {
        name,
        description: resolve_text(row, DESCRIPTION_ALIASES),
        disease_type: resolve_text(row, DISEASE_TYPE_ALIASES),
        sample_size: parse_sample_size(&resolve_text(row, SAMPLE_SIZE_ALIASES)),
        data_accessibility: resolve_text(row, DATA_ACCESSIBILITY_ALIASES),
        wgs_available: resolve_text(row, WGS_AVAILABLE_ALIASES),
        imaging_types: resolve_text(row, IMAGING_TYPES_ALIASES),
        modalities: resolve_text(row, MODALITIES_ALIASES),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("test rows must be objects"),
        }
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Dataset_Name "), "datasetname");
        assert_eq!(normalize_key("WGS Available?"), "wgsavailable?");
        assert_eq!(normalize_key(" - . _ "), "");
    }

    #[test]
    fn test_normalized_header_matches_alias() {
        let r = row(json!({"Dataset_Name ": "ADNI", "Other": "x"}));
        assert_eq!(resolve_text(&r, NAME_ALIASES), "ADNI");
    }

    #[test]
    fn test_exact_match_follows_alias_rank() {
        let r = row(json!({"Disease": "PD", "disease_type": "AD"}));
        assert_eq!(resolve_text(&r, DISEASE_TYPE_ALIASES), "AD");
    }

    #[test]
    fn test_normalized_match_prefers_first_row_key() {
        let r = row(json!({"DESCRIPTION": "first", "description.": "second"}));
        assert_eq!(resolve_text(&r, DESCRIPTION_ALIASES), "first");
    }

    #[test]
    fn test_substring_match_either_direction() {
        let r = row(json!({"Total Sample Size (baseline)": "812"}));
        assert_eq!(resolve_text(&r, SAMPLE_SIZE_ALIASES), "812");

        let r = row(json!({"Modal": "MRI"}));
        assert_eq!(resolve_text(&r, MODALITIES_ALIASES), "MRI");
    }

    #[test]
    fn test_blank_normalized_key_never_matches_by_containment() {
        let r = row(json!({"__": "junk"}));
        assert_eq!(find_column(&r, IMAGING_TYPES_ALIASES), None);
    }

    #[test]
    fn test_first_match_wins_even_when_empty() {
        let r = row(json!({"Dataset Name": "", "Title": "Fallback"}));
        assert_eq!(resolve_text(&r, NAME_ALIASES), "");
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("  ADNI  ")), Some("ADNI".to_string()));
        assert_eq!(render_value(&json!("")), None);
        assert_eq!(render_value(&json!(0)), None);
        assert_eq!(render_value(&json!(false)), None);
        assert_eq!(render_value(&Value::Null), None);
        assert_eq!(render_value(&json!(1518.0)), Some("1518".to_string()));
        assert_eq!(render_value(&json!(2.5)), Some("2.5".to_string()));
    }

    #[test]
    fn test_parse_sample_size() {
        assert_eq!(parse_sample_size("1,518 (ADNI)"), 1518);
        assert_eq!(parse_sample_size("n/a"), 0);
        assert_eq!(parse_sample_size(""), 0);
        assert_eq!(parse_sample_size("-42"), -42);
        assert_eq!(parse_sample_size("~3,000"), 3000);
        assert_eq!(parse_sample_size("99999999999"), 0);
    }

    #[test]
    fn test_resolve_dataset_full_row() {
        let value = json!({
            "Dataset Name": " ADNI ",
            "Description": "Alzheimer's Disease Neuroimaging Initiative",
            "Disease Type": "AD",
            "Sample Size": "1,518 (ADNI)",
            "Data Accessibility": "Open",
            "WGS Available": "Yes",
            "Imaging Types": "MRI, PET",
            "Modalities": "MRI"
        });

        let dataset = resolve_dataset(&value, 0).unwrap();

        assert_eq!(dataset.name, "ADNI");
        assert_eq!(dataset.disease_type, "AD");
        assert_eq!(dataset.sample_size, 1518);
        assert_eq!(dataset.wgs_available, "Yes");
        assert_eq!(dataset.imaging_types, "MRI, PET");
    }

    #[test]
    fn test_resolve_dataset_missing_name_lists_columns() {
        let value = json!({"Dataset Name": "", "Disease Type": "AD"});

        let err = resolve_dataset(&value, 1).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Row 2: Missing dataset name. Available columns: Dataset Name, Disease Type"
        );
    }

    #[test]
    fn test_resolve_dataset_rejects_non_object() {
        let err = resolve_dataset(&json!("ADNI"), 4).unwrap_err();
        assert_eq!(err, RowError::NotAnObject { row: 5 });
    }
}
