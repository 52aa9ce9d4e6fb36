//! Stats storage backends.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use super::WinStats;

/// Failure to read or write persisted stats.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("stats file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("stats file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where win counts live between games.
pub trait StatsStore {
    /// Read the current counts. A store that has never been written reads as
    /// all zeros.
    fn load(&mut self) -> Result<WinStats, StatsError>;

    /// Replace the stored counts.
    fn save(&mut self, stats: &WinStats) -> Result<(), StatsError>;
}

/// Win counts in a JSON file.
///
/// Writes go to a sibling temp file first and are renamed into place.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsStore for JsonFileStore {
    fn load(&mut self) -> Result<WinStats, StatsError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(WinStats::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&mut self, stats: &WinStats) -> Result<(), StatsError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(stats)?)?;
        fs::rename(&tmp, &self.path)?;

        debug!("saved stats to {}", self.path.display());
        Ok(())
    }
}

/// Win counts held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    stats: WinStats,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new(stats: WinStats) -> Self {
        Self { stats, saves: 0 }
    }

    /// Number of `save` calls so far.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl StatsStore for MemoryStore {
    fn load(&mut self) -> Result<WinStats, StatsError> {
        Ok(self.stats)
    }

    fn save(&mut self, stats: &WinStats) -> Result<(), StatsError> {
        self.stats = *stats;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new(WinStats { loyal: 1, rebel: 0, spy: 0 });
        assert_eq!(store.load().unwrap().loyal, 1);

        store.save(&WinStats { loyal: 2, rebel: 0, spy: 0 }).unwrap();
        assert_eq!(store.load().unwrap().loyal, 2);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let mut store = JsonFileStore::new("/nonexistent/dir/stats.json");
        assert_eq!(store.load().unwrap(), WinStats::default());
    }
}
