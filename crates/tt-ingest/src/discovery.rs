//! Roster file discovery.

use std::path::{Path, PathBuf};

use tt_model::SubjectCode;

use crate::error::{IngestError, Result};
use crate::sheet::SourceFormat;

/// Lists all roster files (CSV or spreadsheet) in a directory.
///
/// Returns files sorted by filename.
pub fn list_roster_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        // Spreadsheet lock files (~$EC301.xlsx) are not rosters.
        let hidden = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("~$") || name.starts_with('.'));
        if !hidden && SourceFormat::is_supported(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Subject code implied by a roster's file name, e.g. `EC301.xlsx` → `EC301`.
pub fn subject_from_path(path: &Path) -> Option<SubjectCode> {
    let stem = path.file_stem()?.to_str()?;
    SubjectCode::new(stem).ok()
}
