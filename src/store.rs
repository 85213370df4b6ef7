// src/store.rs

//! Snapshot persistence.
//!
//! The engine never writes anything itself; callers hand a
//! [`ProjectState`] snapshot to a [`SnapshotStore`] after committing edits.
//! Saves are skipped when the serialized snapshot is unchanged, so callers
//! can save after every mutation (or on a debounce timer) cheaply.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blake3::Hasher;
use tracing::{debug, info};

use crate::model::ProjectState;
use crate::types::StorageMode;

/// Relative path (from the store root) to the snapshot file.
///
/// The effective path on disk is `<root>/.sitesched/snapshot.json`.
pub const SNAPSHOT_FILE_PATH: &str = ".sitesched/snapshot.json";

fn snapshot_file_path(root: &Path) -> PathBuf {
    root.join(SNAPSHOT_FILE_PATH)
}

/// Stable fingerprint of a snapshot's serialized form.
pub fn snapshot_fingerprint(snapshot: &ProjectState) -> Result<String> {
    let bytes = serde_json::to_vec(snapshot).context("serializing snapshot")?;
    Ok(fingerprint_bytes(&bytes))
}

fn fingerprint_bytes(bytes: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    hasher.finalize().to_hex().to_string()
}

/// Abstract storage for project snapshots.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<ProjectState>>;
    /// Persist `snapshot`; returns `false` if it matched what was stored.
    fn save(&mut self, snapshot: &ProjectState) -> Result<bool>;
}

/// Stores the snapshot as pretty JSON in `.sitesched/snapshot.json`.
pub struct FileSnapshotStore {
    root: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        snapshot_file_path(&self.root)
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<ProjectState>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let contents =
            fs::read_to_string(&path).with_context(|| format!("reading snapshot {:?}", path))?;
        let snapshot = serde_json::from_str(&contents)
            .with_context(|| format!("parsing snapshot {:?}", path))?;
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &ProjectState) -> Result<bool> {
        let path = self.path();
        let new_fp = snapshot_fingerprint(snapshot)?;

        if let Some(existing) = self.load()? {
            if snapshot_fingerprint(&existing)? == new_fp {
                debug!(path = ?path, "snapshot unchanged; skipping write");
                return Ok(false);
            }
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;
        fs::write(&path, json).with_context(|| format!("writing snapshot {:?}", path))?;

        info!(path = ?path, fingerprint = %new_fp, "stored snapshot (file)");
        Ok(true)
    }
}

/// Keeps the latest snapshot in memory only.
#[derive(Default)]
pub struct MemorySnapshotStore {
    current: Option<ProjectState>,
    fingerprint: Option<String>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<ProjectState>> {
        Ok(self.current.clone())
    }

    fn save(&mut self, snapshot: &ProjectState) -> Result<bool> {
        let fp = snapshot_fingerprint(snapshot)?;
        if self.fingerprint.as_deref() == Some(fp.as_str()) {
            return Ok(false);
        }
        debug!(fingerprint = %fp, "stored snapshot (memory)");
        self.current = Some(snapshot.clone());
        self.fingerprint = Some(fp);
        Ok(true)
    }
}

/// Pick a store implementation for `mode`.
pub fn open_store(mode: StorageMode, root: PathBuf) -> Box<dyn SnapshotStore> {
    match mode {
        StorageMode::File => Box::new(FileSnapshotStore::new(root)),
        StorageMode::Memory => Box::new(MemorySnapshotStore::new()),
    }
}
