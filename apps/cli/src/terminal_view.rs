//! Terminal rendition of the report view.

use crate::colors::ReportColors;
use crate::render::render_chart;
use auditor_core::{Chart, ChartTarget, Region, ReportView};
use colored::Colorize;
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Writes result boxes and charts to `out`, alerts to `err`.
///
/// The first write error is kept and returned by [`TerminalView::finish`].
pub struct TerminalView<O: Write, E: Write> {
    out: O,
    err: E,
    colors: ReportColors,
    containers: BTreeSet<ChartTarget>,
    write_error: Option<io::Error>,
}

impl TerminalView<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr(), ReportColors::new())
    }
}

impl<O: Write, E: Write> TerminalView<O, E> {
    pub fn new(out: O, err: E, colors: ReportColors) -> Self {
        let containers = [
            ChartTarget::ClassDistribution,
            ChartTarget::GroupAccuracy,
            ChartTarget::ConfusionMatrix,
        ]
        .into_iter()
        .collect();
        Self { out, err, colors, containers, write_error: None }
    }

    /// Flushes both streams and reports the first failed write.
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(e) = self.write_error.take() {
            return Err(e);
        }
        self.out.flush()?;
        self.err.flush()
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.write_error.get_or_insert(e);
        }
    }
}

impl<O: Write, E: Write> ReportView for TerminalView<O, E> {
    fn alert(&mut self, message: &str) {
        let result = writeln!(self.err, "{} {}", "⚠".color(self.colors.warning()).bold(), message);
        self.record(result);
    }

    fn show_result(&mut self, region: Region, body: &str) {
        let heading = format!("── {} ──", region.title()).color(self.colors.heading()).bold();
        let result = writeln!(self.out, "\n{}\n{}", heading, body);
        self.record(result);
    }

    fn draw_chart(&mut self, target: ChartTarget, chart: &Chart) {
        if !self.containers.contains(&target) {
            return;
        }
        let result = write!(self.out, "\n{}", render_chart(chart, &self.colors));
        self.record(result);
    }

    fn has_chart_container(&self, target: ChartTarget) -> bool {
        self.containers.contains(&target)
    }

    fn create_chart_container(&mut self, target: ChartTarget) {
        self.containers.insert(target);
    }
}
