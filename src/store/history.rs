use crate::core::conversion::ConversionRecord;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Append-only, newline-delimited log of completed conversions.
///
/// The file is opened and closed on every append and never read back,
/// truncated or rotated. Appends are not locked, so callers must not write
/// from several threads at once.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        HistoryLog {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends the record and logs any failure. A conversion the user has
    /// already seen must not be undone by a failed write.
    pub fn append(&self, record: &ConversionRecord) {
        if let Err(e) = self.try_append(record) {
            warn!(error = %e, path = %self.path.display(), "Failed to save conversion history");
        }
    }

    /// Appends the record as one line and syncs it to disk before returning.
    pub fn try_append(&self, record: &ConversionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open history file: {}", self.path.display()))?;

        writeln!(file, "{record}")
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))?;
        file.flush()?;
        file.sync_all()
            .with_context(|| format!("Failed to sync history file: {}", self.path.display()))?;

        debug!("Saved history line: {}", record);
        Ok(())
    }
}
