//! Durable persistence for the last-reset timestamp
//!
//! One JSON record, overwritten on every reset. Saves go through a
//! process-unique temporary file in the target directory followed by a
//! rename, so a crash or power loss mid-write can never leave a torn
//! record for the next startup to trip over.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Schema tag written into every record. Anything else is treated as an
/// unknown schema on load.
const SCHEMA_VERSION: u32 = 1;

/// On-disk record format: `{"last_reset": "<RFC 3339 UTC>", "version": 1}`
#[derive(Debug, Serialize, Deserialize)]
struct PersistedRecord {
    last_reset: DateTime<Utc>,
    version: u32,
}

/// Single-record store for the counter's reset timestamp
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted timestamp, falling back to the current time.
    ///
    /// A missing file, unreadable file, malformed JSON, or unknown schema
    /// version is a recoverable startup condition: log a warning and seed
    /// the counter with `Utc::now()`. This never returns an error, so a
    /// bad state file can never block startup.
    pub fn load(&self) -> DateTime<Utc> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    "Could not read persistence file {}: {}. Initializing with current time",
                    self.path.display(),
                    e
                );
                return Utc::now();
            }
        };

        let record: PersistedRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    "Persistence file {} is corrupt ({}). Initializing with current time",
                    self.path.display(),
                    e
                );
                return Utc::now();
            }
        };

        if record.version != SCHEMA_VERSION {
            warn!(
                "Persistence file {} has unknown schema version {}. Initializing with current time",
                self.path.display(),
                record.version
            );
            return Utc::now();
        }

        info!(
            "Loaded last reset from {}: {}",
            self.path.display(),
            record.last_reset
        );
        record.last_reset
    }

    /// Persist a reset timestamp atomically.
    ///
    /// Writes the record to a uniquely named temporary file in the target
    /// directory, syncs it, then renames over the target. The rename is
    /// the only operation that changes what a subsequent load observes.
    /// Errors are returned to the caller for logging; the in-memory state
    /// stays authoritative either way.
    pub fn save(&self, last_reset: DateTime<Utc>) -> anyhow::Result<()> {
        let record = PersistedRecord {
            last_reset,
            version: SCHEMA_VERSION,
        };

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create state directory {}", dir.display()))?;

        let tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        serde_json::to_writer(tmp.as_file(), &record)
            .context("failed to serialize state record")?;
        tmp.as_file()
            .sync_all()
            .context("failed to sync state record")?;
        tmp.persist(&self.path)
            .with_context(|| format!("failed to rename into {}", self.path.display()))?;

        debug!("Saved state to {}: {}", self.path.display(), last_reset);
        Ok(())
    }

    /// Save wrapper for the reset path: log the failure instead of
    /// propagating it, and report whether the write went through.
    pub fn save_logged(&self, last_reset: DateTime<Utc>) -> bool {
        match self.save(last_reset) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save state to {}: {:#}", self.path.display(), e);
                false
            }
        }
    }
}
