//! Raw sheet model and CSV reading.
//!
//! A raw sheet is an untyped 2-D grid of trimmed cell strings plus its
//! provenance. Header location happens later; reading preserves every row.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use freight_model::Vendor;

use crate::error::{IngestError, Result};

/// An invoice file as an untyped grid of cells.
#[derive(Debug, Clone)]
pub struct RawSheet {
    /// File name (not the full path) for lineage.
    pub source_file: String,
    pub vendor: Vendor,
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    pub fn new(source_file: impl Into<String>, vendor: Vendor, rows: Vec<Vec<String>>) -> Self {
        Self {
            source_file: source_file.into(),
            vendor,
            rows,
        }
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads an invoice CSV into a raw grid.
///
/// Header rows, banner rows, and summary rows all come through as-is;
/// rows that are entirely blank are dropped since no stage can use them.
pub fn read_invoice_sheet(path: &Path, vendor: Vendor) -> Result<RawSheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let source_file = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
        .to_string();
    debug!(file = %source_file, vendor = %vendor, rows = rows.len(), "read invoice sheet");
    Ok(RawSheet::new(source_file, vendor, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_grid_and_drops_blank_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Invoice Export,,").unwrap();
        writeln!(file, ",,").unwrap();
        writeln!(file, "Tracking Number,Net Charge,Zone").unwrap();
        writeln!(file, "794644790132,$18.40,02").unwrap();
        file.flush().unwrap();

        let sheet = read_invoice_sheet(file.path(), Vendor::Fedex).unwrap();
        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[1][0], "Tracking Number");
        assert_eq!(sheet.rows[2][1], "$18.40");
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = read_invoice_sheet(file.path(), Vendor::Ups);
        assert!(matches!(result, Err(IngestError::EmptyFile { .. })));
    }
}
