// src/report/mod.rs

//! Report shaping and chart rendering.
//!
//! - [`builder`] turns an [`crate::pipeline::AggregateReport`] into the
//!   deterministic text summary and the three numeric series.
//! - [`chart`] defines the renderer seam ([`ChartRenderer`]) and the
//!   shipped SVG bar-chart implementation.
//!
//! Nothing here performs I/O except the renderer writing its output file;
//! persisting the text report is the caller's responsibility.

pub mod builder;
pub mod chart;

pub use builder::{
    build, ReportOutput, GLOBAL_PROGRESS_CHART, REPORT_FILE_NAME, UNIT_PROGRESS_CHART,
    UNIT_STORAGE_CHART,
};
pub use chart::{ChartRenderer, ChartSeries, Orientation, SvgRenderer};
