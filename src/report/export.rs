//! JSON export of the member collection.

use crate::models::Member;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no member data to export")]
    NoMembers,

    #[error("failed to write export file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize members: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File name for an export made on `date`, e.g. `members-data-2024-03-20.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("members-data-{}.json", date.format("%Y-%m-%d"))
}

/// Write `members` as a pretty JSON array into `dir`. Returns the file path.
pub fn export_members(
    members: &[Member],
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    if members.is_empty() {
        return Err(ExportError::NoMembers);
    }

    let json = serde_json::to_string_pretty(members)?;
    let path = dir.join(export_file_name(date));

    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    std::fs::write(&path, json).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!("Exported {} members to {}", members.len(), path.display());
    Ok(path)
}
