//! Turns uploaded CSV or spreadsheet payloads into rows of JSON primitives.
//!
//! Every [`Row`] maps a header to a string, number or boolean, in header
//! order. Rows are later serialized as the staged `file_content`.

use std::collections::{HashMap, HashSet};
use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use calamine::{Data, DataType, Reader};
use serde_json::{Map, Value};

use crate::core::error::{AppError, Result};
use crate::features::uploads::models::FileType;
use crate::shared::validation::DATA_URI_PREFIX_REGEX;

/// One normalized record, keyed by column header
pub type Row = Map<String, Value>;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest magnitude at which every integral f64 is exactly representable
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Normalize a raw payload of the declared type into rows
pub fn normalize(content: &str, file_type: FileType) -> Result<Vec<Row>> {
    let payload = strip_data_uri(content);

    let rows = match file_type {
        FileType::Csv => parse_csv(&decode_csv_text(payload))?,
        FileType::Xlsx | FileType::Xls => {
            let bytes = decode_base64(payload).ok_or_else(|| {
                AppError::Parse("spreadsheet content is not valid base64".to_string())
            })?;
            parse_workbook(bytes)?
        }
    };

    Ok(ensure_json_safe(rows))
}

/// Drop a leading `data:<mediatype>[;base64],` prefix if present
pub fn strip_data_uri(content: &str) -> &str {
    match DATA_URI_PREFIX_REGEX.find(content) {
        Some(prefix) => &content[prefix.end()..],
        None => content,
    }
}

fn decode_base64(payload: &str) -> Option<Vec<u8>> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if compact.is_empty() {
        return None;
    }
    STANDARD.decode(compact).ok()
}

/// Base64-decoded UTF-8 text, or the payload itself when it is not base64
fn decode_csv_text(payload: &str) -> String {
    let text = decode_base64(payload)
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| payload.to_string());

    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

fn parse_csv(text: &str) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = dedupe_headers(
        reader
            .headers()
            .map_err(|e| AppError::Parse(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect(),
    );

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AppError::Parse(e.to_string()))?;

        // Short records are padded with "", surplus cells are ignored
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let cell = record.get(idx).unwrap_or_default();
                (header.clone(), Value::String(cell.to_string()))
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

fn parse_workbook(bytes: Vec<u8>) -> Result<Vec<Row>> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| AppError::Parse(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Parse("workbook has no worksheets".to_string()))?
        .map_err(|e| AppError::Parse(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let headers = match sheet_rows.next() {
        Some(cells) => dedupe_headers(header_names(cells)),
        None => return Ok(Vec::new()),
    };

    // Blank rows inside the data are kept; only the trailing run is dropped
    let mut records: Vec<&[Data]> = sheet_rows.collect();
    while records
        .last()
        .is_some_and(|cells| cells.iter().all(is_blank_cell))
    {
        records.pop();
    }

    let rows = records
        .into_iter()
        .map(|cells| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = cells
                        .get(idx)
                        .map(coerce_cell)
                        .unwrap_or_else(|| Value::String(String::new()));
                    (header.clone(), value)
                })
                .collect::<Row>()
        })
        .collect();

    Ok(rows)
}

/// Header labels from the first sheet row; blank cells become `Unnamed: <idx>`
pub fn header_names(cells: &[Data]) -> Vec<String> {
    cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let label = match coerce_cell(cell) {
                Value::String(s) => s,
                other => other.to_string(),
            };
            if label.trim().is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                label
            }
        })
        .collect()
}

/// Suffix repeated labels as `Name`, `Name.1`, `Name.2` so no column is lost
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut unique = Vec::with_capacity(headers.len());

    for header in headers {
        let mut label = header.clone();
        if seen.contains(&label) {
            let count = counts.entry(header.clone()).or_insert(0);
            loop {
                *count += 1;
                label = format!("{}.{}", header, count);
                if !seen.contains(&label) {
                    break;
                }
            }
        }
        seen.insert(label.clone());
        unique.push(label);
    }

    unique
}

fn is_blank_cell(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Convert one spreadsheet cell into a JSON primitive
pub fn coerce_cell(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::String(String::new()),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) => Value::String(dt.format(DATETIME_FORMAT).to_string()),
            None => Value::String(cell.to_string()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Float(f) => float_value(*f),
        Data::Int(i) => Value::from(*i),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) => Value::String(s.clone()),
    }
}

fn float_value(f: f64) -> Value {
    if f.is_nan() {
        Value::String(String::new())
    } else if f.is_infinite() {
        Value::String(f.to_string())
    } else if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER {
        Value::from(f as i64)
    } else {
        Value::from(f)
    }
}

/// Replace anything that is not a JSON primitive with its string form
pub fn ensure_json_safe(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::Null => Value::String(String::new()),
                        Value::Array(_) | Value::Object(_) => Value::String(value.to_string()),
                        primitive => primitive,
                    };
                    (key, value)
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};
    use serde_json::json;

    #[test]
    fn test_csv_raw_text_with_ragged_rows() {
        let content = "Dataset Name,Disease Type,Sample Size\nADNI,AD,1518\nNACC,AD\nPPMI,PD,400,extra\n";

        let rows = normalize(content, FileType::Csv).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(
            Value::Object(rows[0].clone()),
            json!({"Dataset Name": "ADNI", "Disease Type": "AD", "Sample Size": "1518"})
        );
        assert_eq!(rows[1]["Sample Size"], json!(""));
        assert_eq!(rows[2].len(), 3);
        assert_eq!(
            rows[0].keys().collect::<Vec<_>>(),
            vec!["Dataset Name", "Disease Type", "Sample Size"]
        );
    }

    #[test]
    fn test_csv_base64_with_data_uri_and_bom() {
        let encoded = STANDARD.encode("\u{feff}name,n\nADNI,1518\n");
        let content = format!("data:text/csv;base64,{}", encoded);

        let rows = normalize(&content, FileType::Csv).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], json!("ADNI"));
        assert_eq!(rows[0]["n"], json!("1518"));
    }

    #[test]
    fn test_csv_header_only_yields_no_rows() {
        let rows = normalize("name,description\n", FileType::Csv).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_strip_data_uri_only_removes_prefix() {
        assert_eq!(strip_data_uri("data:text/csv,a,b\n1,2"), "a,b\n1,2");
        assert_eq!(strip_data_uri("a,b\n1,2"), "a,b\n1,2");
    }

    #[test]
    fn test_spreadsheet_requires_base64() {
        let err = normalize("not base64 at all!", FileType::Xlsx).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_spreadsheet_rejects_non_workbook_bytes() {
        let content = STANDARD.encode("plain text, not a workbook");
        let err = normalize(&content, FileType::Xls).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    fn workbook_content(build: impl FnOnce(&mut Worksheet)) -> String {
        let mut workbook = Workbook::new();
        build(workbook.add_worksheet());
        let bytes = workbook.save_to_buffer().unwrap();
        format!(
            "data:application/vnd.openxmlformats-officedocument.spreadsheetml.sheet;base64,{}",
            STANDARD.encode(bytes)
        )
    }

    #[test]
    fn test_xlsx_workbook_rows() {
        let content = workbook_content(|sheet| {
            let date_format = Format::new().set_num_format("yyyy-mm-dd");
            let collected = ExcelDateTime::from_ymd(2024, 1, 2).unwrap();

            for (col, header) in ["Dataset Name", "Sample Size", "WGS Available", "Collected"]
                .iter()
                .enumerate()
            {
                sheet.write_string(0, col as u16, *header).unwrap();
            }
            sheet.write_string(0, 5, "Dataset Name").unwrap();

            sheet.write_string(1, 0, "ADNI").unwrap();
            sheet.write_number(1, 1, 1518.0).unwrap();
            sheet.write_boolean(1, 2, true).unwrap();
            sheet
                .write_datetime_with_format(1, 3, &collected, &date_format)
                .unwrap();
            sheet.write_string(1, 5, "alias").unwrap();

            // row 2 left blank on purpose
            sheet.write_string(3, 0, "NACC").unwrap();
            sheet.write_number(3, 1, 40.5).unwrap();
            sheet.write_boolean(3, 2, false).unwrap();

            sheet.write_string(4, 0, "   ").unwrap();
        });

        let rows = normalize(&content, FileType::Xlsx).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0].keys().collect::<Vec<_>>(),
            vec![
                "Dataset Name",
                "Sample Size",
                "WGS Available",
                "Collected",
                "Unnamed: 4",
                "Dataset Name.1"
            ]
        );
        assert_eq!(
            Value::Object(rows[0].clone()),
            json!({
                "Dataset Name": "ADNI",
                "Sample Size": 1518,
                "WGS Available": true,
                "Collected": "2024-01-02 00:00:00",
                "Unnamed: 4": "",
                "Dataset Name.1": "alias"
            })
        );
        assert!(rows[1].values().all(|v| v == &json!("")));
        assert_eq!(rows[1].len(), 6);
        assert_eq!(rows[2]["Dataset Name"], json!("NACC"));
        assert_eq!(rows[2]["Sample Size"], json!(40.5));
        assert_eq!(rows[2]["WGS Available"], json!(false));
        assert_eq!(rows[2]["Collected"], json!(""));

        let encoded = serde_json::to_string(&rows).unwrap();
        let decoded: Vec<Row> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, rows);

        // Format is sniffed from the bytes, not the declared extension
        assert_eq!(normalize(&content, FileType::Xls).unwrap(), rows);
    }

    #[test]
    fn test_xlsx_empty_sheet_yields_no_rows() {
        let content = workbook_content(|_| {});
        assert!(normalize(&content, FileType::Xlsx).unwrap().is_empty());
    }

    #[test]
    fn test_xlsx_header_only_yields_no_rows() {
        let content = workbook_content(|sheet| {
            sheet.write_string(0, 0, "Dataset Name").unwrap();
            sheet.write_string(1, 0, "").unwrap();
        });
        assert!(normalize(&content, FileType::Xlsx).unwrap().is_empty());
    }

    #[test]
    fn test_csv_duplicate_headers_are_suffixed() {
        let rows = normalize("Name,Name,n,Name\nADNI,alias,1518,x\n", FileType::Csv).unwrap();

        assert_eq!(
            Value::Object(rows[0].clone()),
            json!({"Name": "ADNI", "Name.1": "alias", "n": "1518", "Name.2": "x"})
        );
    }

    #[test]
    fn test_dedupe_headers_skips_taken_suffixes() {
        let headers = vec!["a".to_string(), "a.1".to_string(), "a".to_string()];
        assert_eq!(dedupe_headers(headers), vec!["a", "a.1", "a.2"]);
    }

    #[test]
    fn test_coerce_cell() {
        assert_eq!(coerce_cell(&Data::Empty), json!(""));
        assert_eq!(coerce_cell(&Data::Float(f64::NAN)), json!(""));
        assert_eq!(coerce_cell(&Data::Float(1518.0)), json!(1518));
        assert_eq!(coerce_cell(&Data::Float(2.5)), json!(2.5));
        assert_eq!(coerce_cell(&Data::Int(-3)), json!(-3));
        assert_eq!(coerce_cell(&Data::Bool(true)), json!(true));
        assert_eq!(
            coerce_cell(&Data::DateTimeIso("2024-01-02T03:04:05".to_string())),
            json!("2024-01-02T03:04:05")
        );
        assert_eq!(coerce_cell(&Data::String("ADNI".to_string())), json!("ADNI"));
    }

    #[test]
    fn test_header_names_fill_blanks() {
        let cells = vec![
            Data::String("Dataset Name".to_string()),
            Data::Empty,
            Data::Float(2021.0),
        ];

        assert_eq!(header_names(&cells), vec!["Dataset Name", "Unnamed: 1", "2021"]);
    }

    #[test]
    fn test_normalized_rows_serialize_and_round_trip() {
        let mut row = Row::new();
        row.insert("name".to_string(), json!("ADNI"));
        row.insert("missing".to_string(), Value::Null);
        row.insert("nested".to_string(), json!({"a": 1}));
        row.insert("n".to_string(), json!(1518));

        let rows = ensure_json_safe(vec![row]);
        assert_eq!(rows[0]["missing"], json!(""));
        assert_eq!(rows[0]["nested"], json!("{\"a\":1}"));

        let encoded = serde_json::to_string(&rows).unwrap();
        let decoded: Vec<Row> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, rows);
    }
}
