//! Stored-file descriptor and destination layout.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, TimeZone};

use crate::StorageError;

/// Local-disk persistence.
pub mod disk;
pub use disk::{DiskStorage, FilenameStrategy};

/// Descriptor of a successfully stored upload.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Generated filename on disk.
    pub filename: String,
    /// MIME type declared by the client.
    pub mime_type: String,
    /// Filename supplied by the client.
    pub original_filename: String,
    /// Absolute path of the stored file.
    pub path: PathBuf,
    /// Declared size in bytes.
    pub size: u64,
}

/// Returns the absolute directory an upload received at `now` is stored in.
///
/// Date-sorted layouts append `YEAR/MONTH/DAY` without zero padding, so
/// 24 April 2024 becomes `root/2024/4/24`.
pub fn destination_directory<Tz: TimeZone>(
    root: &Path,
    date_sorted: bool,
    now: &DateTime<Tz>,
) -> Result<PathBuf, StorageError> {
    let root = absolute_root(root)?;
    if !date_sorted {
        return Ok(root);
    }

    Ok(root
        .join(now.year().to_string())
        .join(now.month().to_string())
        .join(now.day().to_string()))
}

fn absolute_root(root: &Path) -> Result<PathBuf, StorageError> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(|err| {
        StorageError::new(format!(
            "cannot resolve storage root `{}`: {err}",
            root.display()
        ))
    })?;
    Ok(cwd.join(root))
}
