//! Read/write header descriptor JSON files.
//!
//! The file wraps the axis-1 keywords with the axis length and some
//! provenance so that an axis can be rebuilt later with
//! [`SpectroscopicAxis::from_header`].

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::axis::{HeaderDescriptor, SpectroscopicAxis};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "NAXIS1")]
    pub naxis1: usize,
    pub linear: bool,
    #[serde(flatten)]
    pub header: HeaderDescriptor,
}

impl HeaderFile {
    pub fn new(header: HeaderDescriptor, naxis1: usize, linear: bool) -> Self {
        Self {
            tool: "specax".to_string(),
            generated_at: Utc::now(),
            naxis1,
            linear,
            header,
        }
    }

    /// Rebuild the axis described by this file.
    pub fn to_axis(&self) -> Result<SpectroscopicAxis, AppError> {
        Ok(SpectroscopicAxis::from_header(&self.header, self.naxis1)?)
    }
}

/// Write a header JSON file.
pub fn write_header_json(path: &Path, file: &HeaderFile) -> Result<(), AppError> {
    let out = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create header JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::new(2, format!("Failed to write header JSON: {e}")))?;
    Ok(())
}

/// Read a header JSON file.
pub fn read_header_json(path: &Path) -> Result<HeaderFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open header JSON '{}': {e}", path.display()))
    })?;
    let header: HeaderFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid header JSON: {e}")))?;
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::DEFAULT_TOLERANCE;

    #[test]
    fn header_file_round_trips_axis() {
        let values: Vec<f64> = (0..32).map(|i| 230.0 + 0.01 * i as f64).collect();
        let mut axis = SpectroscopicAxis::new(values, "GHz").unwrap();
        let (header, linear) = axis.build_header_descriptor(DEFAULT_TOLERANCE);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("axis.json");
        write_header_json(&path, &HeaderFile::new(header.clone(), axis.len(), linear)).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"CTYPE1\": \"FREQ-REST\""));
        assert!(raw.contains("\"NAXIS1\": 32"));

        let back = read_header_json(&path).unwrap();
        assert_eq!(back.header, header);
        let rebuilt = back.to_axis().unwrap();
        assert_eq!(rebuilt.len(), 32);
        for (a, b) in rebuilt.values().iter().zip(axis.values()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn nonlinear_header_cannot_rebuild_axis() {
        let mut axis = SpectroscopicAxis::new(vec![1.0, 2.0, 4.0], "GHz").unwrap();
        let (header, linear) = axis.build_header_descriptor(DEFAULT_TOLERANCE);
        let err = HeaderFile::new(header, 3, linear).to_axis().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
