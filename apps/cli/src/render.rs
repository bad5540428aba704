//! Text renditions of the report charts.

use crate::colors::ReportColors;
use auditor_core::{BarChart, Chart, Gauge, Heatmap, PieChart};
use colored::Colorize;
use comfy_table::{Cell, Color as CellColor, Table};
use std::fmt::Write;

/// Width of bars and gauge axes, in cells.
const BAR_WIDTH: usize = 30;

/// Renders any chart as text.
pub fn render_chart(chart: &Chart, colors: &ReportColors) -> String {
    match chart {
        Chart::Pie(pie) => render_pie(pie, colors),
        Chart::Bar(bar) => render_bar(bar, colors),
        Chart::Heatmap(heatmap) => render_heatmap(heatmap),
        Chart::Gauge(gauge) => render_gauge(gauge, colors),
    }
}

fn filled(fraction: f64) -> usize {
    ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round()) as usize
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

/// Pie as proportional bars with percentages.
pub fn render_pie(pie: &PieChart, colors: &ReportColors) -> String {
    let mut out = format!("{}\n", pie.title.bold());
    if pie.slices.is_empty() {
        out.push_str("  (no classes)\n");
        return out;
    }

    let width = label_width(pie.slices.iter().map(|s| s.label.as_str()));
    for (index, slice) in pie.slices.iter().enumerate() {
        let share = pie.share(index);
        let cells = filled(share);
        let _ = writeln!(
            out,
            "  {:<width$}  {}{}  {:>5.1}% ({})",
            slice.label,
            "█".repeat(cells).color(colors.heading()),
            "░".repeat(BAR_WIDTH - cells).color(colors.muted()),
            share * 100.0,
            format_number(slice.value),
            width = width
        );
    }
    out
}

/// Horizontal bars scaled to the largest value (at least 1.0).
pub fn render_bar(bar: &BarChart, colors: &ReportColors) -> String {
    let mut out = format!("{}\n", bar.title.bold());
    if bar.bars.is_empty() {
        out.push_str("  (no groups)\n");
        return out;
    }

    let scale = bar.max_value().max(1.0);
    let width = label_width(bar.bars.iter().map(|b| b.label.as_str()));
    for point in &bar.bars {
        let cells = filled(point.value / scale);
        let _ = writeln!(
            out,
            "  {:<width$}  {}{}  {}",
            point.label,
            "█".repeat(cells).color(colors.heading()),
            " ".repeat(BAR_WIDTH - cells),
            format_number(point.value),
            width = width
        );
    }
    if let Some(overall) = bar.overall {
        let _ = writeln!(out, "  overall accuracy: {}", format_number(overall));
    }
    out
}

/// Confusion matrix as a table; darker cells hold larger counts.
pub fn render_heatmap(heatmap: &Heatmap) -> String {
    let columns = heatmap.cells.iter().map(Vec::len).max().unwrap_or(0);
    let (min, max) = (heatmap.min_value(), heatmap.max_value());

    let mut table = Table::new();
    let mut header = vec![Cell::new("actual \\ predicted")];
    header.extend((0..columns).map(|c| Cell::new(c)));
    table.set_header(header);

    for (index, row) in heatmap.cells.iter().enumerate() {
        let mut cells = vec![Cell::new(index)];
        cells.extend(
            row.iter()
                .map(|&value| Cell::new(format_number(value)).bg(shade(value, min, max))),
        );
        table.add_row(cells);
    }

    format!("{}\n{}\n", heatmap.title.bold(), table)
}

// Viridis endpoints, interpolated.
fn shade(value: f64, min: f64, max: f64) -> CellColor {
    const LOW: (f64, f64, f64) = (68.0, 1.0, 84.0);
    const HIGH: (f64, f64, f64) = (253.0, 231.0, 37.0);

    let t = if max > min { (value - min) / (max - min) } else { 0.0 };
    let mix = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    CellColor::Rgb { r: mix(LOW.0, HIGH.0), g: mix(LOW.1, HIGH.1), b: mix(LOW.2, HIGH.2) }
}

/// Gauge as a banded axis with a needle under the value.
pub fn render_gauge(gauge: &Gauge, colors: &ReportColors) -> String {
    let span = gauge.max - gauge.min;
    let mut axis = String::new();
    for band in &gauge.bands {
        let start = filled((band.from - gauge.min) / span);
        let end = filled((band.to - gauge.min) / span);
        let _ = write!(axis, "{}", "━".repeat(end.saturating_sub(start)).color(colors.band(band.color)));
    }

    let needle = filled(gauge.fraction()).min(BAR_WIDTH.saturating_sub(1));
    let band_name = gauge.band().map_or("unknown", |b| match b.color {
        auditor_core::BandColor::Green => "green",
        auditor_core::BandColor::Yellow => "yellow",
        auditor_core::BandColor::Red => "red",
    });

    format!(
        "{}\n  {} [{}] {}\n  {}▲\n  value: {} ({} band)\n",
        gauge.title.bold(),
        format_number(gauge.min),
        axis,
        format_number(gauge.max),
        " ".repeat(needle + format_number(gauge.min).len() + 2),
        format_number(gauge.value),
        band_name
    )
}

/// Integers without a fraction, everything else with up to three decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.3}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
