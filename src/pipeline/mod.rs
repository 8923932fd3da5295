// src/pipeline/mod.rs

//! Per-unit processing and fleet-wide aggregation.
//!
//! - [`unit`] turns one unit directory into a [`UnitResult`] (stage
//!   completion, weighted progress, storage size).
//! - [`aggregate`] fans `process_unit` out over a bounded worker pool and
//!   collects the results into a deterministic [`AggregateReport`].

pub mod aggregate;
pub mod unit;

pub use aggregate::{aggregate, AggregateReport};
pub use unit::{process_unit, StageCompletion, UnitResult};
