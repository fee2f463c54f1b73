//! Append-only JSON-lines state log.
//!
//! A pure diagnostic sink: the engine never reads it back, and write
//! failures are logged and swallowed so a full disk cannot take the
//! simulation down.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::warn;

use crate::sim::{ForceBreakdown, FullState};

/// Which point of the step a record was captured at.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogPhase {
    Init,
    PreStep,
    PostStep,
}

/// One log line.
#[derive(Debug, Clone, Serialize)]
pub struct StateRecord {
    /// Wall-clock seconds since the Unix epoch.
    pub timestamp: f64,
    pub step: u64,
    pub phase: LogPhase,
    pub state: FullState,
    pub force_components: ForceBreakdown,
    pub angular_acceleration_deg: f32,
}

pub struct StateLog {
    file: File,
    path: PathBuf,
}

impl StateLog {
    /// Create (truncating) the log file, making parent directories as
    /// needed. Creation failure disables logging; it is reported by the
    /// caller, not fatal.
    pub fn create(path: &Path) -> std::io::Result<Self> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record; failures are logged and swallowed.
    pub fn append(&mut self, record: &StateRecord) {
        match serde_json::to_string(record) {
            Ok(line) => {
                if let Err(err) = writeln!(self.file, "{line}") {
                    warn!(path = %self.path.display(), %err, "failed to write state log record");
                }
            }
            Err(err) => warn!(%err, "failed to serialize state log record"),
        }
    }
}

pub(crate) fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or(0.0)
}
