// src/scan/stage.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

/// Literal substring that marks a stage log as successfully finished.
///
/// This is the line GROMACS `mdrun` prints on clean completion; detection is
/// purely textual and binary — there is no partial-progress parsing.
pub const COMPLETION_MARKER: &str = "Finished mdrun on rank 0";

/// One step of the fixed simulation pipeline.
///
/// The set is closed: every unit goes through energy minimisation, the two
/// equilibrations and the production run, each evidenced by its own log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Em,
    Nvt,
    Npt,
    Md,
}

impl Stage {
    /// All stages in fixed pipeline order.
    pub const ALL: [Stage; 4] = [Stage::Em, Stage::Nvt, Stage::Npt, Stage::Md];

    /// Short label used for chart categories.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Em => "EM",
            Stage::Nvt => "NVT",
            Stage::Npt => "NPT",
            Stage::Md => "MD",
        }
    }

    /// Longer name used in the text report headings.
    pub fn description(self) -> &'static str {
        match self {
            Stage::Em => "EM",
            Stage::Nvt => "NVT Equilibration",
            Stage::Npt => "NPT Equilibration",
            Stage::Md => "MD Simulation",
        }
    }

    /// Evidence log file, relative to the unit directory.
    ///
    /// The production-run log lives under the `analysis/` subdirectory; the
    /// three preparation logs sit directly in the unit directory.
    pub fn evidence_path(self) -> PathBuf {
        match self {
            Stage::Em => PathBuf::from("EM.log"),
            Stage::Nvt => PathBuf::from("NVT.log"),
            Stage::Npt => PathBuf::from("NPT.log"),
            Stage::Md => Path::new("analysis").join("MD.log"),
        }
    }

    /// Contribution of this stage to a unit's overall progress.
    ///
    /// The production run dominates; the weights sum to 1.0.
    pub fn weight(self) -> f64 {
        match self {
            Stage::Em => 1.0 / 12.0,
            Stage::Nvt => 1.0 / 12.0,
            Stage::Npt => 1.0 / 12.0,
            Stage::Md => 9.0 / 12.0,
        }
    }
}

/// Outcome of probing one stage's evidence file.
///
/// Read faults are absorbed here rather than propagated: `Missing` and
/// `Unreadable` both degrade to "not completed", but the caller can see
/// which case occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvidence {
    /// Log exists and contains the completion marker.
    Completed,
    /// Log exists but the marker is absent.
    Incomplete,
    /// No evidence file on disk.
    Missing,
    /// Evidence file exists but could not be read.
    Unreadable,
}

impl StageEvidence {
    pub fn is_completed(self) -> bool {
        matches!(self, StageEvidence::Completed)
    }
}

/// Check whether `stage` has finished for the unit rooted at `unit_dir`.
///
/// A missing or unreadable log is never an error for the pipeline; it is
/// logged and reported as evidence, and the stage counts as not completed.
pub fn inspect_stage(unit_dir: &Path, stage: Stage) -> StageEvidence {
    let log_file = unit_dir.join(stage.evidence_path());

    if !log_file.exists() {
        debug!(stage = stage.label(), path = ?log_file, "evidence file missing");
        return StageEvidence::Missing;
    }

    match fs::read_to_string(&log_file) {
        Ok(contents) => {
            if contents.contains(COMPLETION_MARKER) {
                StageEvidence::Completed
            } else {
                StageEvidence::Incomplete
            }
        }
        Err(err) => {
            error!(stage = stage.label(), path = ?log_file, error = %err, "error reading evidence file");
            StageEvidence::Unreadable
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = Stage::ALL.iter().map(|s| s.weight()).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn marker_with_surrounding_text_counts_as_completed() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("EM.log"),
            "step 50000\nFinished mdrun on rank 0 after 3 hours\nGROMACS reminds you...",
        )
        .unwrap();

        assert_eq!(inspect_stage(dir.path(), Stage::Em), StageEvidence::Completed);
        assert!(inspect_stage(dir.path(), Stage::Em).is_completed());
    }

    #[test]
    fn empty_log_is_incomplete() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("NVT.log"), "").unwrap();

        assert_eq!(inspect_stage(dir.path(), Stage::Nvt), StageEvidence::Incomplete);
    }

    #[test]
    fn missing_log_is_missing_not_completed() {
        let dir = tempdir().unwrap();

        let evidence = inspect_stage(dir.path(), Stage::Npt);
        assert_eq!(evidence, StageEvidence::Missing);
        assert!(!evidence.is_completed());
    }

    #[test]
    fn md_evidence_lives_under_analysis_subdir() {
        let dir = tempdir().unwrap();

        // Marker in the wrong place must not count.
        fs::write(dir.path().join("MD.log"), COMPLETION_MARKER).unwrap();
        assert_eq!(inspect_stage(dir.path(), Stage::Md), StageEvidence::Missing);

        fs::create_dir(dir.path().join("analysis")).unwrap();
        fs::write(dir.path().join("analysis").join("MD.log"), COMPLETION_MARKER).unwrap();
        assert_eq!(inspect_stage(dir.path(), Stage::Md), StageEvidence::Completed);
    }
}
