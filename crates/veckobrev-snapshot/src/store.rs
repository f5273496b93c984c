//! Snapshot persistence, one snapshot per target week.
//!
//! ## File layout
//!
//! ```text
//! {dir}/
//!   week_{year}_{week}.json   pretty-printed UTF-8 JSON
//! ```
//!
//! Writes go to a dot-prefixed temp file in the same directory, are synced,
//! then renamed over the target. Concurrent writers of the same week race;
//! the last rename wins.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};
use veckobrev_core::IsoWeek;

use crate::errors::{Result, SnapshotError};
use crate::model::Snapshot;

/// Key-value storage of snapshots by target week.
pub trait SnapshotStore: Send + Sync {
    /// Load the snapshot for `week`; `None` when nothing was captured.
    fn get(&self, week: IsoWeek) -> Result<Option<Snapshot>>;
    /// Store `snapshot`, replacing any earlier capture of the same week.
    fn put(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Snapshots as JSON files in a directory.
#[derive(Clone, Debug)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the snapshot for `week`.
    pub fn path_for(&self, week: IsoWeek) -> PathBuf {
        self.dir.join(file_name(week))
    }
}

fn file_name(week: IsoWeek) -> String {
    format!("week_{}_{}.json", week.year(), week.week())
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> SnapshotError {
    move |source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn get(&self, week: IsoWeek) -> Result<Option<Snapshot>> {
        let path = self.path_for(week);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "no snapshot stored");
                return Ok(None);
            }
            Err(source) => return Err(SnapshotError::Io { path, source }),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| SnapshotError::Decode { path, source })
    }

    fn put(&self, snapshot: &Snapshot) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        let target = self.path_for(snapshot.week);
        let temp = self.dir.join(format!(".{}.tmp", file_name(snapshot.week)));
        let json = serde_json::to_string_pretty(snapshot)?;

        let mut file = std::fs::File::create(&temp).map_err(io_err(&temp))?;
        file.write_all(json.as_bytes()).map_err(io_err(&temp))?;
        file.sync_all().map_err(io_err(&temp))?;
        drop(file);

        std::fs::rename(&temp, &target).map_err(io_err(&target))?;
        info!(path = ?target, week = %snapshot.week, "snapshot saved");
        Ok(())
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshots: Mutex<HashMap<IsoWeek, Snapshot>>,
}

impl MemorySnapshotStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored weeks.
    pub fn len(&self) -> usize {
        self.snapshots.lock().len()
    }

    /// No week stored.
    pub fn is_empty(&self) -> bool {
        self.snapshots.lock().is_empty()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn get(&self, week: IsoWeek) -> Result<Option<Snapshot>> {
        Ok(self.snapshots.lock().get(&week).cloned())
    }

    fn put(&self, snapshot: &Snapshot) -> Result<()> {
        let _ = self.snapshots.lock().insert(snapshot.week, snapshot.clone());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
