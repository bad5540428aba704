//! Chart models extracted from endpoint results.
//!
//! Each `from_result` constructor is a best-effort presence check: it returns
//! `None` when the expected field is missing, malformed, or the result is
//! error-marked, and the caller simply draws nothing.

use crate::result::EndpointResult;
use serde::Serialize;
use serde_json::{Map, Value};

/// Field holding the per-label counts of a dataset analysis.
pub const CLASS_COUNTS_FIELD: &str = "class_counts";
/// Field holding per-group accuracy of a fairness analysis.
pub const GROUP_ACCURACIES_FIELD: &str = "group_accuracies";
/// Optional overall accuracy next to the group accuracies.
pub const OVERALL_ACCURACY_FIELD: &str = "overall_accuracy";
/// Field holding the model's confusion matrix.
pub const CONFUSION_MATRIX_FIELD: &str = "confusion_matrix";
/// Field holding the differential privacy epsilon.
pub const EPSILON_FIELD: &str = "differential_privacy_epsilon";

/// A labelled numeric value (pie slice or bar).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

/// Class distribution of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<DataPoint>,
}

impl PieChart {
    pub fn from_result(result: &EndpointResult) -> Option<Self> {
        let counts = result.chartable_field(CLASS_COUNTS_FIELD)?.as_object()?;
        Some(Self { title: "Class Distribution".to_string(), slices: numeric_entries(counts) })
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Fraction of the whole taken by slice `index`; zero when the pie is empty.
    pub fn share(&self, index: usize) -> f64 {
        let total = self.total();
        match self.slices.get(index) {
            Some(slice) if total > 0.0 => slice.value / total,
            _ => 0.0,
        }
    }
}

/// Accuracy per sensitive group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<DataPoint>,
    /// Reference line, when the backend reports one.
    pub overall: Option<f64>,
}

impl BarChart {
    pub fn from_result(result: &EndpointResult) -> Option<Self> {
        let accuracies = result.chartable_field(GROUP_ACCURACIES_FIELD)?.as_object()?;
        Some(Self {
            title: "Group Accuracies".to_string(),
            bars: numeric_entries(accuracies),
            overall: result.field(OVERALL_ACCURACY_FIELD).and_then(Value::as_f64),
        })
    }

    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }
}

/// Confusion matrix; rows are actual classes, columns predicted ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub title: String,
    pub cells: Vec<Vec<f64>>,
}

impl Heatmap {
    pub fn from_result(result: &EndpointResult) -> Option<Self> {
        let rows = result.chartable_field(CONFUSION_MATRIX_FIELD)?.as_array()?;
        let cells = rows
            .iter()
            .map(|row| row.as_array()?.iter().map(Value::as_f64).collect::<Option<Vec<_>>>())
            .collect::<Option<Vec<_>>>()?;
        Some(Self { title: "Confusion Matrix".to_string(), cells })
    }

    pub fn max_value(&self) -> f64 {
        self.cells.iter().flatten().copied().fold(0.0, f64::max)
    }

    pub fn min_value(&self) -> f64 {
        self.cells.iter().flatten().copied().reduce(f64::min).unwrap_or(0.0)
    }
}

/// Colour of a gauge band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BandColor {
    Green,
    Yellow,
    Red,
}

/// Half-open range `[from, to)` of the gauge axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeBand {
    pub from: f64,
    pub to: f64,
    pub color: BandColor,
}

/// Differential privacy epsilon on a 0 to 10 dial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub title: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub bands: Vec<GaugeBand>,
}

impl Gauge {
    pub fn epsilon(value: f64) -> Self {
        Self {
            title: "Differential Privacy (ε)".to_string(),
            value,
            min: 0.0,
            max: 10.0,
            bands: vec![
                GaugeBand { from: 0.0, to: 2.0, color: BandColor::Green },
                GaugeBand { from: 2.0, to: 5.0, color: BandColor::Yellow },
                GaugeBand { from: 5.0, to: 10.0, color: BandColor::Red },
            ],
        }
    }

    pub fn from_result(result: &EndpointResult) -> Option<Self> {
        let epsilon = result.chartable_field(EPSILON_FIELD)?;
        if !epsilon.is_number() {
            return None;
        }
        epsilon.as_f64().map(Self::epsilon)
    }

    /// The band the value falls in. Values off the axis take the nearest band.
    pub fn band(&self) -> Option<&GaugeBand> {
        self.bands
            .iter()
            .find(|b| self.value >= b.from && self.value < b.to)
            .or_else(|| {
                if self.value < self.min { self.bands.first() } else { self.bands.last() }
            })
    }

    /// Needle position as a fraction of the axis, clamped to `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Any chart a view can draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Chart {
    Pie(PieChart),
    Bar(BarChart),
    Heatmap(Heatmap),
    Gauge(Gauge),
}

fn numeric_entries(map: &Map<String, Value>) -> Vec<DataPoint> {
    map.iter()
        .filter_map(|(label, value)| value.as_f64().map(|value| DataPoint { label: label.clone(), value }))
        .collect()
}
