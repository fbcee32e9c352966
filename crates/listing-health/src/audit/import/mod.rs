//! Review CSV import for platform exports.
//!
//! Accepts the export column layout (`Review ID`, `Reviewer`, `Rating`,
//! `Comment`, `Created At`, `Replied At`) with RFC 3339 or plain-date
//! timestamps, and yields reviews ready for the analyzer.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::audit::signals::NormalizedReview;

#[derive(Debug)]
pub enum ReviewImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: usize, detail: String },
}

impl std::fmt::Display for ReviewImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewImportError::Io(err) => write!(f, "failed to read review export: {}", err),
            ReviewImportError::Csv(err) => write!(f, "invalid review CSV data: {}", err),
            ReviewImportError::InvalidRow { line, detail } => {
                write!(f, "invalid review row at line {}: {}", line, detail)
            }
        }
    }
}

impl std::error::Error for ReviewImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReviewImportError::Io(err) => Some(err),
            ReviewImportError::Csv(err) => Some(err),
            ReviewImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for ReviewImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ReviewImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ReviewCsvImporter;

impl ReviewCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<NormalizedReview>, ReviewImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<NormalizedReview>, ReviewImportError> {
        parser::parse_reviews(reader)
    }
}
