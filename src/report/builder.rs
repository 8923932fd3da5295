// src/report/builder.rs

use std::cmp::Ordering;
use std::fmt::Write as _;

use crate::pipeline::AggregateReport;
use crate::report::chart::{ChartSeries, Orientation};
use crate::scan::Stage;

/// Fixed artifact names, relative to the output directory.
pub const REPORT_FILE_NAME: &str = "complete_monitoring_report.txt";
pub const GLOBAL_PROGRESS_CHART: &str = "global_progress.svg";
pub const UNIT_PROGRESS_CHART: &str = "progress_per_unit.svg";
pub const UNIT_STORAGE_CHART: &str = "storage_per_unit.svg";

/// Everything one report run hands to the I/O layer: the text summary and
/// the three series for the chart renderer.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub text: String,
    pub global_progress: ChartSeries,
    pub unit_progress: ChartSeries,
    pub unit_storage: ChartSeries,
}

/// Shape an [`AggregateReport`] into its presentation form.
///
/// Pure data shaping: byte-identical output for equal input reports. The
/// embedded timestamp is the report's own `generated_at`, so rebuilding the
/// same report reproduces the same text.
pub fn build(report: &AggregateReport) -> ReportOutput {
    ReportOutput {
        text: build_text(report),
        global_progress: build_global_series(report),
        unit_progress: build_unit_progress_series(report),
        unit_storage: build_unit_storage_series(report),
    }
}

fn build_text(report: &AggregateReport) -> String {
    let mut text = String::new();

    let _ = writeln!(
        text,
        "Monitoring Report - {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(text, "Total simulations: {}", report.total_units);
    text.push('\n');

    for stage in Stage::ALL {
        let _ = writeln!(
            text,
            "{} Progress: {} completed ({:.2}%)",
            stage.description(),
            report.completed_count(stage),
            report.completed_percent(stage)
        );
    }
    text.push('\n');

    for stage in Stage::ALL {
        let _ = writeln!(text, "Simulations that completed {}:", stage.label());
        for name in report.completed_units(stage) {
            let _ = writeln!(text, "{name}");
        }
        text.push('\n');
    }

    text
}

fn build_global_series(report: &AggregateReport) -> ChartSeries {
    ChartSeries {
        title: "Global Progress Percentage per Stage".to_string(),
        value_label: "Percentage (%)".to_string(),
        entries: Stage::ALL
            .iter()
            .map(|s| (s.label().to_string(), report.completed_percent(*s)))
            .collect(),
        upper_bound: Some(100.0),
        orientation: Orientation::Vertical,
    }
}

fn build_unit_progress_series(report: &AggregateReport) -> ChartSeries {
    let mut entries: Vec<(String, f64)> = report
        .per_unit
        .iter()
        .map(|u| (u.name.clone(), u.progress_percent))
        .collect();
    sort_ascending(&mut entries);

    ChartSeries {
        title: "Progress Percentage per Simulation".to_string(),
        value_label: "Percentage (%)".to_string(),
        entries,
        upper_bound: Some(100.0),
        orientation: Orientation::Horizontal,
    }
}

fn build_unit_storage_series(report: &AggregateReport) -> ChartSeries {
    let mut entries: Vec<(String, f64)> = report
        .per_unit
        .iter()
        .map(|u| (u.name.clone(), u.size_mb))
        .collect();
    sort_ascending(&mut entries);

    ChartSeries {
        title: "Storage Size per Simulation".to_string(),
        value_label: "Size (MB)".to_string(),
        entries,
        upper_bound: None,
        orientation: Orientation::Horizontal,
    }
}

/// Ascending by value, ties broken by name so equal values still order
/// deterministically.
fn sort_ascending(entries: &mut [(String, f64)]) {
    entries.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
}
