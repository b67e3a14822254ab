// SPDX-License-Identifier: MPL-2.0
//! Writing diagnostic reports to disk.

use std::fs;
use std::io;
use std::path::Path;

use chrono::Local;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// `toastline_diagnostics_YYYYMMDD_HHMMSS.json`, in local time.
#[must_use]
pub fn generate_default_filename() -> String {
    let now = Local::now();
    format!("toastline_diagnostics_{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Writes `content` next to `path` and renames it into place, so a reader
/// never sees a half-written report.
///
/// # Errors
///
/// Returns the underlying I/O error. The temporary file is removed if the
/// rename fails.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}
