use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::CleanError;

const MIB: f64 = 1_048_576.0;

/// Compute total size of a directory recursively.
///
/// Only regular files count. A missing path is zero, and so is a path whose
/// traversal hits any error: the figure is informational, so a partial sum
/// is not worth reporting.
pub fn dir_size(path: &Path) -> u64 {
    if !path.exists() {
        return 0;
    }

    let total = WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .try_fold(0u64, |acc, entry| -> Result<u64, walkdir::Error> {
            let entry = entry?;
            if !entry.file_type().is_file() {
                return Ok(acc);
            }
            Ok(acc + entry.metadata()?.len())
        });

    match total {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Could not measure {}: {e}", path.display());
            0
        }
    }
}

/// Remove everything inside `path` but keep `path` itself.
///
/// Files are removed one by one, sub-directories recursively. The first
/// failure stops the walk and is returned; anything removed before it stays
/// removed. Returns the number of top-level entries removed.
pub fn erase_contents(path: &Path) -> Result<usize, CleanError> {
    let read_dir = fs::read_dir(path).map_err(|e| CleanError::from_io(path, e))?;

    let mut removed = 0;
    for entry in read_dir {
        let entry = entry.map_err(|e| CleanError::from_io(path, e))?;
        let item = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| CleanError::from_io(&item, e))?;

        match remove_entry(&item, file_type) {
            Ok(()) => {
                debug!("Removed {}", item.display());
                removed += 1;
            }
            // Vanished between listing and removal: already gone.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} disappeared before removal", item.display());
            }
            Err(e) => return Err(CleanError::from_io(&item, e)),
        }
    }

    Ok(removed)
}

/// Remove one directory entry. Symlinks and junctions are unlinked, never
/// followed; on Windows a link to a directory needs `remove_dir`.
fn remove_entry(path: &Path, file_type: fs::FileType) -> io::Result<()> {
    if file_type.is_dir() {
        return fs::remove_dir_all(path);
    }
    #[cfg(windows)]
    {
        use std::os::windows::fs::FileTypeExt;
        if file_type.is_symlink_dir() {
            return fs::remove_dir(path);
        }
    }
    fs::remove_file(path)
}

/// Format a byte count as megabytes with two decimals ("12.34 MB").
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / MIB)
}

/// Format byte count as human-readable string.
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.2} GB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.2} MB", bytes as f64 / MIB)
    } else if bytes >= 1_024 {
        format!("{:.2} KB", bytes as f64 / 1_024.0)
    } else {
        format!("{} B", bytes)
    }
}
