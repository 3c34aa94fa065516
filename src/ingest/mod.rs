//! Row ingestion
//!
//! Reduces collaborator-supplied raw rows (CSV export columns or JSON lines)
//! to validated [`ElementReading`]s. The reduction rule is deliberately
//! tolerant: a missing or non-numeric cell in a recognized column is 0.0
//! ("not detected"), never a failure. Errors exist only at the file level:
//! unreadable input, or input with no recognizable element columns at all.
//!
//! Column names are matched case-sensitively against canonical element
//! symbols ("Ca" matches, "CA" does not), plus the bookkeeping columns
//! `sample_id` and `analysis_point`.

use std::collections::HashMap;
use std::fs;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{Element, ElementReading};

/// Ingestion errors. Cell-level problems never surface here.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is empty")]
    EmptyInput,

    #[error("no recognizable element columns in header: {header}")]
    NoElementColumns { header: String },
}

/// Header column roles after matching.
enum ColumnRole {
    Element(Element),
    SampleId,
    AnalysisPoint,
    Ignored,
}

/// Reduce one raw column map to an ElementReading.
///
/// Unrecognized keys are ignored; absent elements stay 0.0.
pub fn reading_from_columns(columns: &HashMap<String, f64>) -> ElementReading {
    let mut reading = ElementReading::default();
    for (name, &value) in columns {
        if let Ok(element) = Element::from_str(name) {
            reading.set_value(element, value);
        }
    }
    reading
}

/// Load a CSV export of EDS point analyses.
///
/// First line is the header. Quoting and locale-specific decimals are the
/// exporting collaborator's concern; this reader only needs numeric columns.
pub fn load_csv(path: &Path) -> Result<Vec<ElementReading>, IngestError> {
    let content = fs::read_to_string(path)?;
    parse_csv(&content)
}

/// Parse CSV content into readings. See [`load_csv`].
pub fn parse_csv(content: &str) -> Result<Vec<ElementReading>, IngestError> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());

    let header = lines.next().ok_or(IngestError::EmptyInput)?;
    let roles: Vec<ColumnRole> = header
        .split(',')
        .map(|name| match name.trim() {
            "sample_id" => ColumnRole::SampleId,
            "analysis_point" => ColumnRole::AnalysisPoint,
            other => Element::from_str(other)
                .map_or(ColumnRole::Ignored, ColumnRole::Element),
        })
        .collect();

    if !roles.iter().any(|r| matches!(r, ColumnRole::Element(_))) {
        return Err(IngestError::NoElementColumns {
            header: header.to_string(),
        });
    }

    let mut readings = Vec::new();
    for (line_no, line) in lines.enumerate() {
        let mut reading = ElementReading::default();
        for (cell, role) in line.split(',').zip(&roles) {
            let cell = cell.trim();
            match role {
                ColumnRole::Element(element) => {
                    let value = parse_cell(cell, line_no);
                    reading.set_value(*element, value);
                }
                ColumnRole::SampleId => {
                    if !cell.is_empty() {
                        reading.sample_id = Some(cell.to_string());
                    }
                }
                ColumnRole::AnalysisPoint => {
                    reading.analysis_point = cell.parse().ok();
                }
                ColumnRole::Ignored => {}
            }
        }
        readings.push(reading);
    }

    Ok(readings)
}

/// Missing or non-numeric cells are "not detected", i.e. 0.0.
fn parse_cell(cell: &str, line_no: usize) -> f64 {
    if cell.is_empty() {
        return 0.0;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            tracing::warn!(line = line_no + 2, cell, "Non-numeric cell coerced to 0.0");
            0.0
        }
    }
}

/// Read JSON-encoded readings, one object per line (pipeline/stdin format).
///
/// Malformed lines are skipped with a warning and never abort the stream.
pub fn read_json_lines<R: BufRead>(reader: R) -> Result<Vec<ElementReading>, IngestError> {
    let mut readings = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<ElementReading>(line) {
            Ok(reading) => readings.push(reading),
            Err(e) => {
                tracing::warn!("Failed to parse reading, skipping line: {e}");
            }
        }
    }
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_from_columns_ignores_unknown_keys() {
        let mut columns = HashMap::new();
        columns.insert("C".to_string(), 30.0);
        columns.insert("P".to_string(), 1.5);
        columns.insert("Spectrum".to_string(), 99.0);
        let reading = reading_from_columns(&columns);
        assert_eq!(reading.c, 30.0);
        assert_eq!(reading.p, 1.5);
        assert_eq!(reading.ca, 0.0);
    }

    #[test]
    fn test_csv_zero_for_missing_and_malformed() {
        let csv = "sample_id,C,P,Ca,Mn\nS-01,30.2,,n.d.,0.4\n";
        let readings = parse_csv(csv).unwrap();
        assert_eq!(readings.len(), 1);
        let r = &readings[0];
        assert_eq!(r.sample_id.as_deref(), Some("S-01"));
        assert_eq!(r.c, 30.2);
        assert_eq!(r.p, 0.0);
        assert_eq!(r.ca, 0.0);
        assert_eq!(r.mn, 0.4);
    }

    #[test]
    fn test_csv_header_matching_is_case_sensitive() {
        // "CA" is not a recognized symbol; only C matches here
        let csv = "C,CA\n10.0,20.0\n";
        let readings = parse_csv(csv).unwrap();
        assert_eq!(readings[0].c, 10.0);
        assert_eq!(readings[0].ca, 0.0);
    }

    #[test]
    fn test_csv_without_element_columns_rejected() {
        let csv = "sample,operator\nS-01,AB\n";
        let err = parse_csv(csv).unwrap_err();
        assert!(matches!(err, IngestError::NoElementColumns { .. }));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(parse_csv(""), Err(IngestError::EmptyInput)));
    }

    #[test]
    fn test_csv_preserves_row_order() {
        let csv = "C,analysis_point\n1.0,1\n2.0,2\n3.0,3\n";
        let readings = parse_csv(csv).unwrap();
        let points: Vec<Option<u32>> = readings.iter().map(|r| r.analysis_point).collect();
        assert_eq!(points, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_json_lines_skip_malformed() {
        let input = "{\"c\": 12.0}\nnot json\n{\"p\": 3.0, \"sample_id\": \"S-02\"}\n";
        let readings = read_json_lines(input.as_bytes()).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].c, 12.0);
        assert_eq!(readings[1].sample_id.as_deref(), Some("S-02"));
    }

    #[test]
    fn test_load_csv_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "C,P,Ca").unwrap();
        writeln!(file, "5.0,12.0,20.0").unwrap();
        let readings = load_csv(file.path()).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].p, 12.0);
    }
}
