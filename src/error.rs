//! Fatal error conditions of the survey pipeline.
//!
//! Only conditions that abort a run live here. Mapping collisions, coercion
//! failures, missing optional fields and empty segments are recovered inside
//! the pipeline and surface as log lines or diagnostics instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurveyError {
    /// Input file does not exist.
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Input has no header row at all.
    #[error("input file {path} has no header row")]
    MissingHeader { path: PathBuf },

    /// Input could not be read as delimited text.
    #[error("input file {path} is not a readable delimited file: {message}")]
    Unparseable { path: PathBuf, message: String },

    #[error("unknown encoding '{label}'")]
    UnknownEncoding { label: String },

    /// A query named a salary field that has no statistics.
    #[error("no statistics for field '{field}'")]
    UnknownField { field: String },
}
