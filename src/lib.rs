//! Loader for the ADHD and general mental-health Reddit datasets.
//!
//! Files are read from two fixed subdirectories of a data root into
//! in-memory [`Table`]s, trying several text encodings before giving up on
//! a file.  Missing or unreadable files are simply left out of the result.
//!
//! Diagnostics for unreadable files are emitted through the [`log`] facade
//! (`warn!`), not printed to stdout.  Install a logger such as `env_logger`
//! to see them; without one they are discarded.

pub mod config;
pub mod data;

pub use config::LoaderConfig;
pub use data::encoding::{TextEncoding, FALLBACK_ENCODINGS};
pub use data::error::ReadError;
pub use data::groups::{load_group, MentalHealthDataLoader};
pub use data::info::{DatasetInfo, DatasetInfoMap};
pub use data::loader::{read_csv_safe, read_spreadsheet};
pub use data::model::{CellValue, DatasetCollection, KeyedMap, Row, Table};

/// Load every dataset under the configured root (see [`LoaderConfig::from_env`]).
pub fn load_data() -> DatasetCollection {
    MentalHealthDataLoader::from_config(&LoaderConfig::from_env()).load_all_data()
}

/// Summaries of every dataset under the configured root.
pub fn get_data_info() -> DatasetInfoMap {
    MentalHealthDataLoader::from_config(&LoaderConfig::from_env()).get_dataset_info()
}
