//! Known-tickets state file.
//!
//! File contract: `{tickets: [string], updated: rfc3339, last_run:
//! epoch_seconds, count: int}`. The set grows monotonically — ticket ids
//! are never reused, so nothing is ever evicted.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::storage::{self, StorageError};

#[derive(Debug, Serialize, Deserialize)]
struct KnownTicketsFile {
    tickets: Vec<String>,
    updated: String,
    #[serde(default)]
    last_run: Option<i64>,
    count: usize,
}

#[derive(Debug)]
pub struct KnownTicketsState {
    path: PathBuf,
    known: HashSet<String>,
    last_run: Option<i64>,
}

impl KnownTicketsState {
    /// Load the state file, starting empty when it is missing or corrupt.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let file: Option<KnownTicketsFile> = storage::read_json(path)?;
        let (known, last_run) = match file {
            Some(file) => (file.tickets.into_iter().collect(), file.last_run),
            None => (HashSet::new(), None),
        };

        info!(
            event = "core.tickets.state_loaded",
            known = known.len(),
            last_run = ?last_run,
        );

        Ok(Self {
            path: path.to_path_buf(),
            known,
            last_run,
        })
    }

    pub fn save(&self) -> Result<(), StorageError> {
        let mut tickets: Vec<String> = self.known.iter().cloned().collect();
        tickets.sort();

        let file = KnownTicketsFile {
            count: tickets.len(),
            tickets,
            updated: Utc::now().to_rfc3339(),
            last_run: self.last_run,
        };
        storage::write_json_atomic(&self.path, &file)?;

        info!(event = "core.tickets.state_saved", known = self.known.len());
        Ok(())
    }

    /// True before the first completed run (nothing recorded yet).
    pub fn is_first_run(&self) -> bool {
        self.known.is_empty()
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    pub fn contains(&self, display_id: &str) -> bool {
        self.known.contains(display_id)
    }

    /// Record an id. Returns `false` when it was already known.
    pub fn insert(&mut self, display_id: &str) -> bool {
        self.known.insert(display_id.to_string())
    }

    /// Epoch seconds of the last completed (or skipped-to) run.
    pub fn last_run(&self) -> Option<i64> {
        self.last_run
    }

    pub fn mark_run(&mut self, epoch_seconds: i64) {
        self.last_run = Some(epoch_seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let state = KnownTicketsState::load(&dir.path().join("known_tickets.json")).unwrap();
        assert!(state.is_first_run());
        assert!(state.last_run().is_none());
    }

    #[test]
    fn roundtrip_preserves_ids_and_last_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("known_tickets.json");

        let mut state = KnownTicketsState::load(&path).unwrap();
        assert!(state.insert("TCK-1"));
        assert!(state.insert("TCK-2"));
        assert!(!state.insert("TCK-1"));
        state.mark_run(1_756_100_000);
        state.save().unwrap();

        let reloaded = KnownTicketsState::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("TCK-1"));
        assert!(reloaded.contains("TCK-2"));
        assert_eq!(reloaded.last_run(), Some(1_756_100_000));
        assert!(!reloaded.is_first_run());
    }

    #[test]
    fn file_carries_count_and_updated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("known_tickets.json");

        let mut state = KnownTicketsState::load(&path).unwrap();
        state.insert("TCK-9");
        state.save().unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["count"], 1);
        assert!(raw["updated"].is_string());
        assert_eq!(raw["tickets"][0], "TCK-9");
    }

    #[test]
    fn corrupt_file_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("known_tickets.json");
        std::fs::write(&path, "][").unwrap();

        let state = KnownTicketsState::load(&path).unwrap();
        assert!(state.is_first_run());
    }
}
