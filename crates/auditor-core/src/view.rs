//! View bindings the client writes into.
//!
//! The client never builds the surrounding layout. It only fills regions and
//! chart targets that the view already owns, apart from the privacy gauge
//! container, which is created on first use.

use crate::charts::Chart;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A result box: heading, pretty-printed body, and a visibility flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Dataset,
    Fairness,
    Mitigation,
    Model,
    Explanation,
    Privacy,
}

impl Region {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dataset => "Dataset Analysis",
            Self::Fairness => "Fairness Analysis",
            Self::Mitigation => "Bias Mitigation",
            Self::Model => "Model Analysis",
            Self::Explanation => "Explanations",
            Self::Privacy => "Privacy Analysis",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A chart area inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartTarget {
    /// Pie in the dataset region
    ClassDistribution,
    /// Bar chart in the fairness region
    GroupAccuracy,
    /// Heatmap in the model region
    ConfusionMatrix,
    /// Gauge in the privacy region, created lazily
    PrivacyGauge,
}

/// Where results, charts, and alerts go.
pub trait ReportView {
    /// Blocking, user-facing notice (e.g. a required file is missing).
    fn alert(&mut self, message: &str);

    /// Replaces the body of `region` with `body` and makes it visible.
    fn show_result(&mut self, region: Region, body: &str);

    /// Draws `chart` into `target`, replacing what was drawn there.
    fn draw_chart(&mut self, target: ChartTarget, chart: &Chart);

    /// Whether `target` exists in the view.
    fn has_chart_container(&self, target: ChartTarget) -> bool;

    /// Creates the container for `target`. Only called when it is missing.
    fn create_chart_container(&mut self, target: ChartTarget);
}

/// Headless view that records everything written to it.
#[derive(Debug, Clone)]
pub struct RecordingView {
    pub alerts: Vec<String>,
    pub regions: BTreeMap<Region, String>,
    pub visible: BTreeSet<Region>,
    pub charts: BTreeMap<ChartTarget, Chart>,
    containers: BTreeSet<ChartTarget>,
    /// How many times each container was created.
    pub containers_created: BTreeMap<ChartTarget, usize>,
}

impl Default for RecordingView {
    fn default() -> Self {
        // The page ships every chart area except the gauge.
        let containers = [
            ChartTarget::ClassDistribution,
            ChartTarget::GroupAccuracy,
            ChartTarget::ConfusionMatrix,
        ]
        .into_iter()
        .collect();

        Self {
            alerts: Vec::new(),
            regions: BTreeMap::new(),
            visible: BTreeSet::new(),
            charts: BTreeMap::new(),
            containers,
            containers_created: BTreeMap::new(),
        }
    }
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self, region: Region) -> Option<&str> {
        self.regions.get(&region).map(String::as_str)
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.visible.contains(&region)
    }

    pub fn chart(&self, target: ChartTarget) -> Option<&Chart> {
        self.charts.get(&target)
    }
}

impl ReportView for RecordingView {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn show_result(&mut self, region: Region, body: &str) {
        self.regions.insert(region, body.to_string());
        self.visible.insert(region);
    }

    fn draw_chart(&mut self, target: ChartTarget, chart: &Chart) {
        if self.containers.contains(&target) {
            self.charts.insert(target, chart.clone());
        }
    }

    fn has_chart_container(&self, target: ChartTarget) -> bool {
        self.containers.contains(&target)
    }

    fn create_chart_container(&mut self, target: ChartTarget) {
        self.containers.insert(target);
        *self.containers_created.entry(target).or_insert(0) += 1;
    }
}
