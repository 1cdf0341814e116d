//! Durable cross-session progression
//!
//! Three fields survive the process: the score of the last finished
//! attempt, the best score ever, and the level the next session starts at.
//! The record is loaded once when the host view mounts and written only at
//! the terminal transitions of an attempt.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Persisted progression fields. Missing keys load as a fresh record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRecord {
    /// Score of the most recently finished attempt
    #[serde(default)]
    pub last_score: u32,
    /// Best score across all attempts
    #[serde(default)]
    pub high_score: u32,
    /// Level the next session starts at, 1-based
    #[serde(default = "default_level")]
    pub level: u32,
}

fn default_level() -> u32 {
    1
}

impl Default for ProgressionRecord {
    fn default() -> Self {
        Self {
            last_score: 0,
            high_score: 0,
            level: 1,
        }
    }
}

/// Storage boundary for the progression record.
///
/// Persistence never fails the game: implementations degrade to a fresh
/// record on load and swallow (but log) write faults.
pub trait ProgressionStore: Send + Sync {
    /// Read the record, or a fresh one when nothing usable is stored
    fn load(&self) -> ProgressionRecord;
    /// Overwrite the stored record
    fn save(&self, record: &ProgressionRecord);
}

impl<S: ProgressionStore + ?Sized> ProgressionStore for Arc<S> {
    fn load(&self) -> ProgressionRecord {
        (**self).load()
    }

    fn save(&self, record: &ProgressionRecord) {
        (**self).save(record)
    }
}

/// JSON file storage - the native analogue of the host app's key-value store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProgressionStore for FileStore {
    fn load(&self) -> ProgressionRecord {
        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(record) => {
                    log::info!("loaded progression from {}", self.path.display());
                    record
                }
                Err(e) => {
                    log::warn!("unreadable progression record, starting fresh: {e}");
                    ProgressionRecord::default()
                }
            },
            Err(_) => {
                log::info!("no progression record, starting fresh");
                ProgressionRecord::default()
            }
        }
    }

    fn save(&self, record: &ProgressionRecord) {
        match serde_json::to_string(record) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::warn!("failed to save progression: {e}");
                } else {
                    log::info!(
                        "progression saved: last {} best {} level {}",
                        record.last_score,
                        record.high_score,
                        record.level
                    );
                }
            }
            Err(e) => log::warn!("failed to encode progression: {e}"),
        }
    }
}

/// In-memory store for tests and hosts without durable storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<ProgressionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressionStore for MemoryStore {
    fn load(&self) -> ProgressionRecord {
        self.record.lock().unwrap().unwrap_or_default()
    }

    fn save(&self, record: &ProgressionRecord) {
        *self.record.lock().unwrap() = Some(*record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dirt-blitz-{name}-{}.json", std::process::id()))
    }

    #[test]
    fn test_missing_file_loads_fresh_record() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.load(), ProgressionRecord::default());
        assert_eq!(store.load().level, 1);
    }

    #[test]
    fn test_file_round_trip() {
        let path = temp_path("roundtrip");
        let store = FileStore::new(&path);
        let record = ProgressionRecord {
            last_score: 215,
            high_score: 480,
            level: 3,
        };
        store.save(&record);
        assert_eq!(store.load(), record);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_corrupt_file_loads_fresh_record() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json{").unwrap();
        let store = FileStore::new(&path);
        assert_eq!(store.load(), ProgressionRecord::default());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let path = temp_path("partial");
        fs::write(&path, r#"{"high_score": 300}"#).unwrap();
        let store = FileStore::new(&path);
        let record = store.load();
        assert_eq!(record.high_score, 300);
        assert_eq!(record.last_score, 0);
        assert_eq!(record.level, 1);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load(), ProgressionRecord::default());
        let record = ProgressionRecord {
            last_score: 10,
            high_score: 20,
            level: 2,
        };
        store.save(&record);
        assert_eq!(store.load(), record);
    }

    #[test]
    fn test_arc_store_delegates() {
        let store = Arc::new(MemoryStore::new());
        let record = ProgressionRecord {
            last_score: 5,
            high_score: 5,
            level: 1,
        };
        ProgressionStore::save(&store, &record);
        assert_eq!(ProgressionStore::load(&store), record);
    }
}
