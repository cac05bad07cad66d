//! Chart rendering for the analysis stage.
//!
//! Charts are written as SVG files. They are presentation only: the caller
//! gets nothing back beyond success or an `Error::Chart` describing the
//! rendering failure.

use std::path::{Path, PathBuf};

use log::{info, warn};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::analysis::{ConditionPivot, MonthlyRevenue};
use crate::error::util::ensure_directory;
use crate::error::{Error, Result};

/// File name of the monthly revenue line chart
pub const MONTHLY_REVENUE_CHART: &str = "monthly_revenue.svg";
/// File name of the cost vs. actual hours scatter plot
pub const COST_VS_HOURS_CHART: &str = "cost_vs_hours.svg";
/// File name of the failure/fix condition heat map
pub const CONDITION_HEATMAP_CHART: &str = "condition_heatmap.svg";

const WIDE: (u32, u32) = (1200, 600);
const TALL: (u32, u32) = (1200, 800);

fn chart_error<E: std::fmt::Display>(error: E) -> Error {
    Error::Chart(error.to_string())
}

/// Pad a value range so points do not sit on the plot border
fn padded_range(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        return (min - pad, max + pad);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Line chart of total revenue per month
pub fn render_monthly_revenue(series: &[MonthlyRevenue], path: &Path) -> Result<()> {
    let Some((min, max)) = bounds(series.iter().map(|m| m.total)) else {
        warn!("No dated revenue to plot, skipping {}", path.display());
        return Ok(());
    };
    let (y_min, y_max) = padded_range(min.min(0.0), max);
    let labels: Vec<String> = series.iter().map(MonthlyRevenue::label).collect();

    let root = SVGBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Total Revenue Over Time", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(-0.5f64..(series.len() as f64 - 0.5), y_min..y_max)
        .map_err(chart_error)?;

    let label_at = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() < 1e-6 && idx >= 0.0 {
            labels.get(idx as usize).cloned().unwrap_or_default()
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Total Revenue")
        .x_labels(series.len().min(24))
        .x_label_formatter(&label_at)
        .draw()
        .map_err(chart_error)?;

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(idx, month)| (idx as f64, month.total))
        .collect();

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(chart_error)?;
    chart
        .draw_series(points.iter().map(|&point| Circle::new(point, 4, BLUE.filled())))
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    Ok(())
}

/// Scatter plot of cost against actual hours
pub fn render_cost_vs_hours(points: &[(f64, f64)], path: &Path) -> Result<()> {
    let (Some((x_min, x_max)), Some((y_min, y_max))) = (
        bounds(points.iter().map(|p| p.0)),
        bounds(points.iter().map(|p| p.1)),
    ) else {
        warn!("No cost/hours pairs to plot, skipping {}", path.display());
        return Ok(());
    };
    let (x_min, x_max) = padded_range(x_min, x_max);
    let (y_min, y_max) = padded_range(y_min, y_max);

    let root = SVGBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Cost vs. Actual Hours", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .x_desc("Actual Hours")
        .y_desc("Cost")
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 4, BLUE.mix(0.6).filled())),
        )
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    Ok(())
}

/// Blue-white-red scale; `t` runs from 0 (lowest) to 1 (highest)
fn coolwarm(t: f64) -> RGBColor {
    const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const MID: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

    let t = t.clamp(0.0, 1.0);
    let (from, to, local) = if t < 0.5 {
        (COOL, MID, t * 2.0)
    } else {
        (MID, WARM, (t - 0.5) * 2.0)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * local).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Heat map of mean cost by failure condition (rows) and fix condition (columns)
///
/// Each filled cell is annotated with its value to one decimal. Combinations
/// that never occur are left blank.
pub fn render_condition_heatmap(pivot: &ConditionPivot, path: &Path) -> Result<()> {
    let Some((min, max)) = pivot.value_range() else {
        warn!("No condition pairs with a cost to plot, skipping {}", path.display());
        return Ok(());
    };
    let n_rows = pivot.row_labels.len() as i32;
    let n_cols = pivot.column_labels.len() as i32;
    let span = max - min;

    let root = SVGBackend::new(path, TALL).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Heatmap of Average Cost by Failure and Fix Conditions",
            ("sans-serif", 24),
        )
        .margin(20)
        .x_label_area_size(160)
        .y_label_area_size(280)
        .build_cartesian_2d((0..n_cols).into_segmented(), (0..n_rows).into_segmented())
        .map_err(chart_error)?;

    // First pivot row is drawn at the top
    let row_label = |value: &SegmentValue<i32>| match value {
        SegmentValue::CenterOf(y) | SegmentValue::Exact(y) => pivot
            .row_labels
            .get((n_rows - 1 - y) as usize)
            .cloned()
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };
    let column_label = |value: &SegmentValue<i32>| match value {
        SegmentValue::CenterOf(x) | SegmentValue::Exact(x) => {
            pivot.column_labels.get(*x as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Fix Condition")
        .y_desc("Failure Condition")
        .x_labels(n_cols as usize)
        .y_labels(n_rows as usize)
        .x_label_formatter(&column_label)
        .y_label_formatter(&row_label)
        .draw()
        .map_err(chart_error)?;

    let annotation = TextStyle::from(("sans-serif", 14).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (row, cells) in pivot.cells.iter().enumerate() {
        let y = n_rows - 1 - row as i32;
        for (col, cell) in cells.iter().enumerate() {
            let Some(value) = cell else { continue };
            let x = col as i32;
            let t = if span > 0.0 { (value - min) / span } else { 0.5 };

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [
                        (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                        (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                    ],
                    coolwarm(t).filled(),
                )))
                .map_err(chart_error)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("{value:.1}"),
                    (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
                    annotation.clone(),
                )))
                .map_err(chart_error)?;
        }
    }

    root.present().map_err(chart_error)?;
    Ok(())
}

/// Render all three charts into `dir`, returning the written files
pub fn render_all(
    dir: &Path,
    series: &[MonthlyRevenue],
    cost_hours: &[(f64, f64)],
    pivot: &ConditionPivot,
) -> Result<Vec<PathBuf>> {
    ensure_directory(dir, "writing charts")?;

    let mut written = Vec::new();

    let path = dir.join(MONTHLY_REVENUE_CHART);
    if !series.is_empty() {
        render_monthly_revenue(series, &path)?;
        written.push(path);
    }

    let path = dir.join(COST_VS_HOURS_CHART);
    if !cost_hours.is_empty() {
        render_cost_vs_hours(cost_hours, &path)?;
        written.push(path);
    }

    let path = dir.join(CONDITION_HEATMAP_CHART);
    if !pivot.is_empty() {
        render_condition_heatmap(pivot, &path)?;
        written.push(path);
    }

    info!("Rendered {} charts into {}", written.len(), dir.display());
    Ok(written)
}
