//! Persists the viewer's layout record between runs.
//!
//! The file holds the JSON of a [`LayoutRecord`] while the viewer was open at
//! exit, and is removed otherwise.

use crate::workbench::LayoutRecord;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default layout file: `~/.local/state/sourcelog/layout.json`.
pub fn default_layout_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("sourcelog").join("layout.json"),
        None => PathBuf::from("sourcelog-layout.json"),
    }
}

/// Read the saved record. Missing or unreadable files yield `None`.
pub fn load_layout(path: &Path) -> Option<LayoutRecord> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read layout");
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring malformed layout");
            None
        }
    }
}

/// Save `record`, or remove the file when there is nothing to restore.
///
/// # Errors
///
/// Returns I/O errors from creating the directory or writing the file.
pub fn save_layout(path: &Path, record: Option<&LayoutRecord>) -> io::Result<()> {
    let Some(record) = record else {
        return match std::fs::remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        };
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(record).map_err(io::Error::other)?;
    std::fs::write(path, json)
}
