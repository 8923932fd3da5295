// src/trigger/file.rs

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::trigger::TriggerSource;

/// Trigger source backed by a request file.
///
/// Anyone with access to the filesystem requests a report by creating the
/// file (`touch report.request`); the trigger consumes the request by
/// removing it, which gives at-most-once delivery per request.
#[derive(Debug)]
pub struct RequestFileTrigger {
    path: PathBuf,
}

impl RequestFileTrigger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TriggerSource for RequestFileTrigger {
    fn has_pending_request(&mut self) -> bool {
        if !self.path.exists() {
            return false;
        }

        // Consume the request. If removal fails we report "no request" and
        // retry on the next tick rather than double-firing now.
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = ?self.path, "report request observed");
                true
            }
            Err(err) => {
                warn!(path = ?self.path, error = %err, "error consuming report request");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn no_file_means_no_request() {
        let dir = tempdir().unwrap();
        let mut trigger = RequestFileTrigger::new(dir.path().join("report.request"));
        assert!(!trigger.has_pending_request());
    }

    #[test]
    fn request_is_observed_exactly_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.request");
        fs::write(&path, "").unwrap();

        let mut trigger = RequestFileTrigger::new(&path);
        assert!(trigger.has_pending_request());
        assert!(!path.exists());
        assert!(!trigger.has_pending_request());
    }

    #[test]
    fn a_new_request_fires_again() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.request");
        let mut trigger = RequestFileTrigger::new(&path);

        fs::write(&path, "").unwrap();
        assert!(trigger.has_pending_request());

        fs::write(&path, "").unwrap();
        assert!(trigger.has_pending_request());
    }
}
