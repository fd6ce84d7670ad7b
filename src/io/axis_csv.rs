//! Axis CSV ingest and export.
//!
//! An axis file is a CSV with a header row; one column holds the coordinate
//! samples, an optional second column holds intensities.
//!
//! - Header matching is case-insensitive and tolerant of a UTF-8 BOM.
//! - Rows that fail to parse are skipped and reported, not fatal.
//! - A file with no usable rows is an error (exit code 3).

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct AxisTable {
    pub values: Vec<f64>,
    /// Present when an intensity column was requested.
    pub intensity: Option<Vec<f64>>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Read the `column` (and optionally `intensity_column`) from a CSV file.
pub fn read_axis_csv(
    path: &Path,
    column: &str,
    intensity_column: Option<&str>,
) -> Result<AxisTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let x_idx = find_column(&header_map, column)?;
    let y_idx = intensity_column
        .map(|name| find_column(&header_map, name))
        .transpose()?;

    let mut values = Vec::new();
    let mut intensity = y_idx.map(|_| Vec::new());
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header; CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let x = match parse_field(&record, x_idx, column) {
            Ok(v) => v,
            Err(message) => {
                row_errors.push(RowError { line, message });
                continue;
            }
        };
        if let (Some(idx), Some(ys), Some(name)) = (y_idx, intensity.as_mut(), intensity_column) {
            match parse_field(&record, idx, name) {
                Ok(y) => ys.push(y),
                Err(message) => {
                    row_errors.push(RowError { line, message });
                    continue;
                }
            }
        }
        values.push(x);
    }

    if values.is_empty() {
        return Err(AppError::new(
            3,
            format!("No valid '{column}' values in '{}'.", path.display()),
        ));
    }

    Ok(AxisTable {
        values,
        intensity,
        row_errors,
        rows_read,
    })
}

/// Write named columns of equal length to a CSV file.
pub fn write_columns_csv(path: &Path, columns: &[(&str, &[f64])]) -> Result<(), AppError> {
    let rows = columns.first().map_or(0, |(_, c)| c.len());
    if let Some((name, _)) = columns.iter().find(|(_, c)| c.len() != rows) {
        return Err(AppError::new(
            2,
            format!("Column '{name}' length differs from the axis length {rows}."),
        ));
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::new(2, format!("Failed to create CSV '{}': {e}", path.display()))
    })?;
    writer
        .write_record(columns.iter().map(|(name, _)| *name))
        .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;
    for i in 0..rows {
        writer
            .write_record(columns.iter().map(|(_, c)| format!("{:.12e}", c[i])))
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV '{}': {e}", path.display())))?;
    Ok(())
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a BOM.
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

fn find_column(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(&normalize_header_name(name))
        .copied()
        .ok_or_else(|| AppError::new(2, format!("CSV is missing required column '{name}'.")))
}

fn parse_field(record: &StringRecord, idx: usize, name: &str) -> Result<f64, String> {
    let raw = record
        .get(idx)
        .ok_or_else(|| format!("missing '{name}' field"))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("invalid '{name}' value '{raw}'"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("non-finite '{name}' value '{raw}'"))
    }
}
