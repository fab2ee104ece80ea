use serde::Serialize;

use super::model::{KeyedMap, Table};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Summary of one loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    /// `(rows, columns)`.
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    /// Deep memory footprint, e.g. `"0.42 MB"`.
    pub memory_usage: String,
}

/// Logical key → summary, in collection order.
pub type DatasetInfoMap = KeyedMap<DatasetInfo>;

impl DatasetInfo {
    pub fn from_table(table: &Table) -> Self {
        DatasetInfo {
            shape: table.shape(),
            columns: table.columns().to_vec(),
            memory_usage: format_megabytes(table.memory_usage_bytes()),
        }
    }
}

/// Format a byte count as megabytes with two decimals.
pub fn format_megabytes(bytes: usize) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}
