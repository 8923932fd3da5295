// src/scan/size.rs

use std::path::Path;

use tracing::warn;
use walkdir::WalkDir;

const BYTES_PER_MB: f64 = (1024 * 1024) as f64;

/// Result of measuring a unit's directory tree.
///
/// Traversal faults are absorbed: every entry that could not be read
/// contributes zero bytes and is counted in `skipped`, so the degradation
/// is visible to the caller instead of silently folded into the total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirSize {
    /// Total size of all regular files, in megabytes.
    pub mb: f64,
    /// Entries skipped because they could not be read or stat'ed.
    pub skipped: usize,
}

/// Recursively sum the sizes of all regular files under `path`.
///
/// Directories and symlinks that fail to stat are skipped; an unreadable
/// subtree never aborts the measurement of the rest of the unit.
pub fn directory_size_mb(path: &Path) -> DirSize {
    let mut total_bytes: u64 = 0;
    let mut skipped = 0usize;

    for entry in WalkDir::new(path) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(root = ?path, error = %err, "skipping unreadable entry during size scan");
                skipped += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(meta) => total_bytes += meta.len(),
            Err(err) => {
                warn!(path = ?entry.path(), error = %err, "could not stat file during size scan");
                skipped += 1;
            }
        }
    }

    DirSize {
        mb: total_bytes as f64 / BYTES_PER_MB,
        skipped,
    }
}
