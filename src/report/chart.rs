// src/report/chart.rs

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Bar direction for a rendered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories along the x axis (few categories, e.g. per-stage totals).
    Vertical,
    /// Categories along the y axis (many categories, e.g. one per unit).
    Horizontal,
}

/// One category→value series handed to the chart renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    /// Label of the value axis, e.g. `"Percentage (%)"`.
    pub value_label: String,
    pub entries: Vec<(String, f64)>,
    /// Fixed axis maximum (e.g. 100 for percentages); `None` scales to the
    /// largest value in the series.
    pub upper_bound: Option<f64>,
    pub orientation: Orientation,
}

impl ChartSeries {
    fn axis_max(&self) -> f64 {
        let data_max = self
            .entries
            .iter()
            .map(|(_, v)| *v)
            .fold(0.0_f64, f64::max);
        // Keep the scale finite even for an all-zero series.
        self.upper_bound.unwrap_or(data_max).max(1.0)
    }
}

/// Collaborator seam: anything that can persist a series as a chart image.
pub trait ChartRenderer {
    fn render(&self, series: &ChartSeries, dest: &Path) -> Result<()>;
}

/// Shipped renderer: writes a plain, deterministic SVG bar chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

const CANVAS_W: f64 = 960.0;
const CANVAS_H: f64 = 640.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_RIGHT: f64 = 40.0;
const BAR_FILL: &str = "#4682b4";

impl ChartRenderer for SvgRenderer {
    fn render(&self, series: &ChartSeries, dest: &Path) -> Result<()> {
        let svg = render_svg(series);
        fs::write(dest, svg).with_context(|| format!("writing chart to {dest:?}"))?;
        debug!(chart = %series.title, path = ?dest, "chart written");
        Ok(())
    }
}

fn render_svg(series: &ChartSeries) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CANVAS_W}" height="{CANVAS_H}" viewBox="0 0 {CANVAS_W} {CANVAS_H}">"#
    );
    let _ = writeln!(out, r#"<rect width="{CANVAS_W}" height="{CANVAS_H}" fill="white"/>"#);
    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="30" font-family="sans-serif" font-size="20" text-anchor="middle">{}</text>"#,
        CANVAS_W / 2.0,
        xml_escape(&series.title)
    );

    match series.orientation {
        Orientation::Vertical => render_vertical_bars(&mut out, series),
        Orientation::Horizontal => render_horizontal_bars(&mut out, series),
    }

    out.push_str("</svg>\n");
    out
}

fn render_vertical_bars(out: &mut String, series: &ChartSeries) {
    let margin_left = 70.0;
    let margin_bottom = 70.0;
    let plot_w = CANVAS_W - margin_left - MARGIN_RIGHT;
    let plot_h = CANVAS_H - MARGIN_TOP - margin_bottom;
    let baseline = MARGIN_TOP + plot_h;
    let max = series.axis_max();

    // Value-axis label, rotated along the left edge.
    let _ = writeln!(
        out,
        r#"<text x="20" y="{:.1}" font-family="sans-serif" font-size="14" text-anchor="middle" transform="rotate(-90 20 {:.1})">{}</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0,
        xml_escape(&series.value_label)
    );
    let _ = writeln!(
        out,
        r#"<line x1="{margin_left}" y1="{baseline:.1}" x2="{:.1}" y2="{baseline:.1}" stroke="black"/>"#,
        margin_left + plot_w
    );

    let n = series.entries.len().max(1) as f64;
    let slot = plot_w / n;
    let bar_w = slot * 0.6;

    for (i, (category, value)) in series.entries.iter().enumerate() {
        let x = margin_left + i as f64 * slot + slot * 0.2;
        let h = (value / max).clamp(0.0, 1.0) * plot_h;
        let y = baseline - h;
        let center = x + bar_w / 2.0;

        let _ = writeln!(
            out,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{bar_w:.1}" height="{h:.1}" fill="{BAR_FILL}"/>"#
        );
        let _ = writeln!(
            out,
            r#"<text x="{center:.1}" y="{:.1}" font-family="sans-serif" font-size="14" text-anchor="middle">{}</text>"#,
            baseline + 20.0,
            xml_escape(category)
        );
        let _ = writeln!(
            out,
            r#"<text x="{center:.1}" y="{:.1}" font-family="sans-serif" font-size="12" text-anchor="middle">{value:.2}</text>"#,
            y - 6.0
        );
    }
}

fn render_horizontal_bars(out: &mut String, series: &ChartSeries) {
    let margin_left = 220.0;
    let margin_bottom = 50.0;
    let plot_w = CANVAS_W - margin_left - MARGIN_RIGHT;
    let plot_h = CANVAS_H - MARGIN_TOP - margin_bottom;
    let max = series.axis_max();

    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="14" text-anchor="middle">{}</text>"#,
        margin_left + plot_w / 2.0,
        CANVAS_H - 12.0,
        xml_escape(&series.value_label)
    );
    let _ = writeln!(
        out,
        r#"<line x1="{margin_left}" y1="{MARGIN_TOP}" x2="{margin_left}" y2="{:.1}" stroke="black"/>"#,
        MARGIN_TOP + plot_h
    );

    let n = series.entries.len().max(1) as f64;
    let slot = plot_h / n;
    let bar_h = slot * 0.6;

    for (i, (category, value)) in series.entries.iter().enumerate() {
        let y = MARGIN_TOP + i as f64 * slot + slot * 0.2;
        let w = (value / max).clamp(0.0, 1.0) * plot_w;
        let middle = y + bar_h / 2.0 + 4.0;

        let _ = writeln!(
            out,
            r#"<rect x="{margin_left}" y="{y:.1}" width="{w:.1}" height="{bar_h:.1}" fill="{BAR_FILL}"/>"#
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{middle:.1}" font-family="sans-serif" font-size="12" text-anchor="end">{}</text>"#,
            margin_left - 8.0,
            xml_escape(category)
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{middle:.1}" font-family="sans-serif" font-size="12">{value:.2}</text>"#,
            margin_left + w + 6.0
        );
    }
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
