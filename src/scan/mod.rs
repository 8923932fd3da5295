// src/scan/mod.rs

//! Filesystem inspection of monitored simulation directories.
//!
//! This module is responsible for:
//! - Locating unit directories under the input root (`locate.rs`).
//! - Deciding per-stage completion from evidence log files (`stage.rs`).
//! - Measuring the storage footprint of a unit's tree (`size.rs`).
//!
//! It does **not** know about scheduling or aggregation; it only turns
//! on-disk state into per-unit facts.

pub mod locate;
pub mod size;
pub mod stage;

pub use locate::{list_units, Unit, UNIT_SUFFIX};
pub use size::{directory_size_mb, DirSize};
pub use stage::{inspect_stage, Stage, StageEvidence, COMPLETION_MARKER};
