use thiserror::Error;

use super::encoding::TextEncoding;

/// Why a single attempt at reading a dataset file failed.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("'{encoding}' codec can't decode the file contents")]
    Decode { encoding: TextEncoding },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No columns to parse from file")]
    NoColumns,

    #[error("Error tokenizing data. Expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Workbook contains no worksheets")]
    NoWorksheet,
}

impl ReadError {
    /// Decoding failures are expected while walking the encoding list.
    pub fn is_decode(&self) -> bool {
        matches!(self, ReadError::Decode { .. })
    }
}
