use std::path::{Path, PathBuf};

use crate::config::LoaderConfig;

use super::info::{DatasetInfo, DatasetInfoMap};
use super::loader::{is_spreadsheet, read_csv_safe, read_spreadsheet};
use super::manifest::{
    Manifest, ADHD_FILES, ADHD_SUBDIR, MENTAL_HEALTH_FILES, MENTAL_HEALTH_SUBDIR,
};
use super::model::DatasetCollection;

// ---------------------------------------------------------------------------
// Group loading
// ---------------------------------------------------------------------------

/// Load every manifest entry of one group that exists under `base_dir`.
///
/// Missing files are skipped without a word.  Files for which
/// `use_spreadsheet` returns true go through the spreadsheet reader; any
/// failure there is logged and the key left out.  Everything else goes
/// through the encoding-fallback CSV reader.
pub fn load_group(
    base_dir: &Path,
    manifest: Manifest,
    use_spreadsheet: fn(&Path) -> bool,
) -> DatasetCollection {
    let mut data = DatasetCollection::new();

    for &(key, filename) in manifest {
        let path = base_dir.join(filename);
        if !path.is_file() {
            log::debug!("{key}: {} not present, skipping", path.display());
            continue;
        }

        let table = if use_spreadsheet(&path) {
            match read_spreadsheet(&path) {
                Ok(table) => Some(table),
                Err(err) => {
                    log::warn!("Failed to load {key}: {err}");
                    None
                }
            }
        } else {
            read_csv_safe(&path)
        };

        if let Some(table) = table {
            data.insert(key, table);
        }
    }

    data
}

fn csv_only(_: &Path) -> bool {
    false
}

// ---------------------------------------------------------------------------
// MentalHealthDataLoader
// ---------------------------------------------------------------------------

/// Loads the ADHD and general mental-health datasets from a data root.
///
/// Nothing is cached: each call reads the files again and hands the
/// caller a fresh collection.
#[derive(Debug, Clone)]
pub struct MentalHealthDataLoader {
    base_path: PathBuf,
    adhd_path: PathBuf,
    mental_health_path: PathBuf,
}

impl Default for MentalHealthDataLoader {
    fn default() -> Self {
        Self::from_config(&LoaderConfig::default())
    }
}

impl MentalHealthDataLoader {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        Self {
            adhd_path: base_path.join(ADHD_SUBDIR),
            mental_health_path: base_path.join(MENTAL_HEALTH_SUBDIR),
            base_path,
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(config.root.clone())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn adhd_path(&self) -> &Path {
        &self.adhd_path
    }

    pub fn mental_health_path(&self) -> &Path {
        &self.mental_health_path
    }

    /// Load the ADHD subreddit posts and comments.
    pub fn load_adhd_data(&self) -> DatasetCollection {
        load_group(&self.adhd_path, ADHD_FILES, csv_only)
    }

    /// Load the general mental-health datasets.
    pub fn load_mental_health_data(&self) -> DatasetCollection {
        load_group(&self.mental_health_path, MENTAL_HEALTH_FILES, is_spreadsheet)
    }

    /// Both groups merged; a key present in both ends up with the
    /// mental-health table.
    pub fn load_all_data(&self) -> DatasetCollection {
        let mut all = self.load_adhd_data();
        all.update(self.load_mental_health_data());
        log::debug!(
            "loaded {} datasets from {}",
            all.len(),
            self.base_path.display()
        );
        all
    }

    /// Reload everything and summarise each dataset.
    pub fn get_dataset_info(&self) -> DatasetInfoMap {
        self.load_all_data()
            .iter()
            .map(|(name, table)| (name.to_string(), DatasetInfo::from_table(table)))
            .collect()
    }
}
