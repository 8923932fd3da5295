// src/engine/mod.rs

//! The long-lived monitor loop and its schedule state.
//!
//! This module ties together:
//! - the fixed-interval schedule (`schedule.rs`)
//! - the report pipeline (locate → aggregate → build → persist → notify)
//!   and the tick-driven loop that decides when to run it (`runtime.rs`)
//!
//! The loop is the only owner of [`ScheduleState`]; worker tasks never see
//! it.

pub mod runtime;
pub mod schedule;

pub use runtime::{MonitorLoop, ReportPipeline, RunOutcome};
pub use schedule::ScheduleState;
