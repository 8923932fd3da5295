// src/pipeline/unit.rs

use tracing::debug;

use crate::scan::{directory_size_mb, inspect_stage, Stage, Unit};

/// Completion flags for the four pipeline stages of one unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCompletion {
    done: [bool; Stage::ALL.len()],
}

impl StageCompletion {
    pub fn set(&mut self, stage: Stage, completed: bool) {
        self.done[stage as usize] = completed;
    }

    pub fn is_done(&self, stage: Stage) -> bool {
        self.done[stage as usize]
    }

    /// Weighted overall progress in percent.
    ///
    /// Stages contribute independently; MD completion does not imply the
    /// preparation stages.
    pub fn progress_percent(&self) -> f64 {
        let fraction: f64 = Stage::ALL
            .iter()
            .filter(|s| self.is_done(**s))
            .map(|s| s.weight())
            .sum();
        fraction * 100.0
    }
}

/// Everything the report needs to know about one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitResult {
    pub name: String,
    pub completed: StageCompletion,
    pub progress_percent: f64,
    pub size_mb: f64,
}

/// Inspect one unit: all four stage logs plus the storage footprint.
///
/// Touches no shared state and absorbs its own I/O faults (see
/// [`crate::scan`]), so any number of invocations can run concurrently.
pub fn process_unit(unit: &Unit) -> UnitResult {
    let mut completed = StageCompletion::default();
    for stage in Stage::ALL {
        completed.set(stage, inspect_stage(&unit.path, stage).is_completed());
    }

    let progress_percent = completed.progress_percent();
    let size = directory_size_mb(&unit.path);

    debug!(
        unit = %unit.name,
        progress = progress_percent,
        size_mb = size.mb,
        skipped_entries = size.skipped,
        "processed unit"
    );

    UnitResult {
        name: unit.name.clone(),
        completed,
        progress_percent,
        size_mb: size.mb,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::tempdir;

    use crate::scan::COMPLETION_MARKER;

    use super::*;

    fn completion_of(stages: &[Stage]) -> StageCompletion {
        let mut c = StageCompletion::default();
        for s in stages {
            c.set(*s, true);
        }
        c
    }

    #[test]
    fn preparation_done_without_md_is_quarter() {
        let c = completion_of(&[Stage::Em, Stage::Nvt, Stage::Npt]);
        assert!((c.progress_percent() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn only_md_done_is_three_quarters() {
        let c = completion_of(&[Stage::Md]);
        assert!((c.progress_percent() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn all_done_is_full_and_none_is_zero() {
        assert!((completion_of(&Stage::ALL).progress_percent() - 100.0).abs() < 1e-9);
        assert_eq!(StageCompletion::default().progress_percent(), 0.0);
    }

    fn write_finished_log(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, format!("...\n{COMPLETION_MARKER}\n")).unwrap();
    }

    #[test]
    fn process_unit_combines_stage_checks_and_size() {
        let dir = tempdir().unwrap();
        write_finished_log(dir.path(), "EM.log");
        write_finished_log(dir.path(), "NVT.log");
        // NPT log present but unfinished.
        fs::write(dir.path().join("NPT.log"), "step 1000\n").unwrap();
        write_finished_log(dir.path(), "analysis/MD.log");

        let unit = Unit {
            name: "ubiquitin_MDS".to_string(),
            path: dir.path().to_path_buf(),
        };
        let result = process_unit(&unit);

        assert!(result.completed.is_done(Stage::Em));
        assert!(result.completed.is_done(Stage::Nvt));
        assert!(!result.completed.is_done(Stage::Npt));
        assert!(result.completed.is_done(Stage::Md));
        // 1/12 + 1/12 + 9/12 of 100.
        assert!((result.progress_percent - (11.0 / 12.0) * 100.0).abs() < 1e-9);
        assert!(result.size_mb > 0.0);
    }
}
