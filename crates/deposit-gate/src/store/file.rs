//! JSON snapshot store on the local filesystem.
//!
//! Every applied batch rewrites the whole snapshot. The new snapshot is
//! written to a sibling temp file and renamed over the old one before the
//! in-memory map changes, so a failed write leaves both at the previous state.
//! Snapshots carry a blake3 digest of their entries that is checked on open.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{StorageError, StorageResult};
use super::keys::{StateKey, StateValue};
use super::memory::apply_to_map;
use super::traits::{StateStore, WriteBatch};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotEntry {
    key: StateKey,
    value: StateValue,
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    digest: String,
    entries: Vec<SnapshotEntry>,
}

fn entries_digest(entries: &[SnapshotEntry]) -> StorageResult<String> {
    let canonical = serde_json::to_vec(entries)?;
    Ok(blake3::hash(&canonical).to_hex().to_string())
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<StateKey, StateValue>,
}

impl FileStore {
    /// Open the snapshot at `path`, or start empty if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            debug!(path = %path.display(), "State file absent; starting empty");
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let raw = fs::read(&path)?;
        let snapshot: Snapshot = serde_json::from_slice(&raw)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StorageError::Integrity(format!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }

        let expected = entries_digest(&snapshot.entries)?;
        if expected != snapshot.digest {
            return Err(StorageError::Integrity(format!(
                "digest mismatch in {}: recorded {}, computed {}",
                path.display(),
                snapshot.digest,
                expected
            )));
        }

        let mut entries = BTreeMap::new();
        for entry in snapshot.entries {
            if entries.insert(entry.key.clone(), entry.value).is_some() {
                return Err(StorageError::Integrity(format!(
                    "duplicate key {:?} in {}",
                    entry.key,
                    path.display()
                )));
            }
        }

        info!(path = %path.display(), entries = entries.len(), "State file loaded");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<StateKey, StateValue>) -> StorageResult<()> {
        let entries: Vec<SnapshotEntry> = entries
            .iter()
            .map(|(key, value)| SnapshotEntry {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            digest: entries_digest(&entries)?,
            entries,
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, &bytes)?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &StateKey) -> StorageResult<Option<StateValue>> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, batch: WriteBatch) -> StorageResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let mut next = self.entries.clone();
        apply_to_map(&mut next, batch);
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }

    fn entries(&self) -> StorageResult<Vec<(StateKey, StateValue)>> {
        Ok(self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn backend_label(&self) -> &'static str {
        "file"
    }
}
