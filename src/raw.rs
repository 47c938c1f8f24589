//! Raw survey export: verbose headers plus one text row per respondent.

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::{debug, info};

use crate::{error::SurveyError, io_utils};

/// Immutable raw input. Headers are the full survey question texts and may
/// repeat; columns are always addressed by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    /// Loads a delimited export. A missing file, an empty file or a file the
    /// csv reader rejects aborts the run.
    pub fn load(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
        let headers = io_utils::reader_headers(&mut reader, encoding).map_err(|err| {
            SurveyError::Unparseable {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        })?;
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(SurveyError::MissingHeader {
                path: path.to_path_buf(),
            }
            .into());
        }

        let mut rows = Vec::new();
        for (row_idx, record) in reader.byte_records().enumerate() {
            let record = record.map_err(|err| SurveyError::Unparseable {
                path: path.to_path_buf(),
                message: format!("row {}: {err}", row_idx + 2),
            })?;
            let decoded = io_utils::decode_record(&record, encoding)
                .with_context(|| format!("Decoding row {} of {path:?}", row_idx + 2))?;
            rows.push(decoded);
        }
        debug!("Raw headers: {:?}", headers);
        info!(
            "Loaded {} row(s) and {} column(s) from {:?}",
            rows.len(),
            headers.len(),
            path
        );
        Ok(Self { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_8;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_reads_headers_and_rows() {
        let file = write_temp("A,B\n1,x\n2,\n");
        let table = RawTable::load(file.path(), b',', UTF_8).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 1), Some(""));
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn load_rejects_missing_file() {
        let err = RawTable::load(Path::new("/nonexistent/encuesta.csv"), b',', UTF_8).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SurveyError>(),
            Some(SurveyError::InputNotFound { .. })
        ));
    }

    #[test]
    fn load_rejects_empty_file() {
        let file = write_temp("");
        let err = RawTable::load(file.path(), b',', UTF_8).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SurveyError>(),
            Some(SurveyError::MissingHeader { .. })
        ));
    }

    #[test]
    fn load_rejects_ragged_rows() {
        let file = write_temp("A,B\n1,2,3\n");
        let err = RawTable::load(file.path(), b',', UTF_8).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SurveyError>(),
            Some(SurveyError::Unparseable { .. })
        ));
    }
}
