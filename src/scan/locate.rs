// src/scan/locate.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Directory name suffix that marks a child of the input root as a
/// monitored simulation unit.
pub const UNIT_SUFFIX: &str = "_MDS";

/// One monitored simulation job.
///
/// Units are rediscovered on every report run and never persisted; identity
/// is the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub name: String,
    pub path: PathBuf,
}

/// List all unit directories directly under `root`.
///
/// A child qualifies iff it is a directory and its name ends with `_MDS`;
/// plain files with a matching name are ignored. An empty vec is a normal
/// outcome, not an error. Listing order is whatever the OS returns —
/// consumers must not rely on it.
///
/// An unreadable root is returned as an error: it is the one startup fault
/// the caller is allowed to treat as fatal.
pub fn list_units(root: &Path) -> io::Result<Vec<Unit>> {
    let mut units = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(root = ?root, error = %err, "skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if name.ends_with(UNIT_SUFFIX) {
            units.push(Unit {
                name: name.to_string(),
                path,
            });
        }
    }

    debug!(root = ?root, count = units.len(), "located unit directories");
    Ok(units)
}
