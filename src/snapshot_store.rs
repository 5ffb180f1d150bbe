use serde::Serialize;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::log;

use crate::LogResult;

const MAX_NAME_ATTEMPTS: u32 = 100;

/// Best effort sink for raw upstream payloads. Implementations never fail.
pub trait SnapshotWriter: Send + Sync {
    fn save(&self, name: &str, data: &Value);
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot directory unavailable")]
    Disabled,
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("not serializable: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct SnapshotStore {
    dir: Option<PathBuf>,
}

impl SnapshotStore {
    /// Creates `dir` if needed. When that fails the store stays usable but every save is a no-op.
    pub fn new(dir: &str) -> SnapshotStore {
        let created = std::fs::create_dir_all(dir)
            .ok_log(&format!("[SNAPSHOT] Error creating data directory {dir}, snapshots disabled"));
        if created.is_some() {
            log::info!("[SNAPSHOT] Data directory ensured at {dir}");
        }
        SnapshotStore { dir: created.map(|_| PathBuf::from(dir)) }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Writes `data` as indented JSON, never overwriting an existing snapshot.
    pub fn write<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> Result<PathBuf, PersistenceError> {
        let dir = self.dir.as_ref().ok_or(PersistenceError::Disabled)?;
        let json = serde_json::to_vec_pretty(data)?;
        let safe_name = sanitize(name);
        let (stem, ext) = match safe_name.strip_suffix(".json") {
            Some(stem) => (stem, ".json"),
            None => (safe_name.as_str(), ""),
        };

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = match attempt {
                0 => dir.join(&safe_name),
                n => dir.join(format!("{stem}-{n}{ext}")),
            };
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_or_remove(file, &path, &json)?;
                    return Ok(path);
                },
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(std::io::Error::new(ErrorKind::AlreadyExists, format!("no free file name for {safe_name}")).into())
    }
}

impl SnapshotWriter for SnapshotStore {
    fn save(&self, name: &str, data: &Value) {
        let before = Instant::now();
        match self.write(name, data) {
            Ok(path) => log::info!("[SNAPSHOT] Saved {} {:.2?}", path.display(), before.elapsed()),
            Err(PersistenceError::Disabled) => log::warn!("[SNAPSHOT] Cannot save {name}, data directory is not available"),
            Err(e) => log::error!("[SNAPSHOT] Error saving {name}: {e}"),
        }
    }
}

/// Discards everything, for tests and for running without a data directory.
pub struct NoopSnapshots;

impl SnapshotWriter for NoopSnapshots {
    fn save(&self, name: &str, _data: &Value) {
        log::debug!("[SNAPSHOT] Skipped {name}");
    }
}

/// A snapshot is either complete or absent.
fn write_or_remove<W: Write>(mut out: W, path: &Path, json: &[u8]) -> std::io::Result<()> {
    let written = out.write_all(json).and_then(|_| out.flush());
    drop(out);
    if written.is_err() {
        std::fs::remove_file(path)
            .ok_log(&format!("[SNAPSHOT] Error removing partial snapshot {}", path.display()));
    }
    written
}

pub fn sanitize(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}
