//! Subscription status state file.
//!
//! File contract: `{subscriptions: {id: status}, updated: rfc3339, count:
//! int}`. The stored value always reflects the most recently observed
//! normalized status, including unrecognized raw strings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::storage::{self, StorageError};

use super::types::{NormalizedStatus, normalize_status};

#[derive(Debug, Serialize, Deserialize)]
struct SubscriptionFile {
    subscriptions: BTreeMap<String, String>,
    updated: String,
    count: usize,
}

#[derive(Debug)]
pub struct SubscriptionState {
    path: PathBuf,
    statuses: BTreeMap<String, String>,
}

impl SubscriptionState {
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let file: Option<SubscriptionFile> = storage::read_json(path)?;
        let statuses = file.map(|f| f.subscriptions).unwrap_or_default();

        info!(event = "core.subscriptions.state_loaded", known = statuses.len());

        Ok(Self {
            path: path.to_path_buf(),
            statuses,
        })
    }

    pub fn save(&self) -> Result<(), StorageError> {
        let file = SubscriptionFile {
            count: self.statuses.len(),
            subscriptions: self.statuses.clone(),
            updated: Utc::now().to_rfc3339(),
        };
        storage::write_json_atomic(&self.path, &file)?;

        info!(event = "core.subscriptions.state_saved", known = self.statuses.len());
        Ok(())
    }

    /// True before the first completed run (nothing recorded yet).
    pub fn is_first_run(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Last observed normalized status for an id, if any.
    pub fn get(&self, id: &str) -> Option<NormalizedStatus> {
        self.statuses.get(id).map(|raw| normalize_status(raw))
    }

    /// Record the latest observation for an id.
    pub fn record(&mut self, id: &str, status: &NormalizedStatus) {
        self.statuses
            .insert(id.to_string(), status.as_stored().to_string());
    }
}
