//! Local dataset preview before upload.

use serde::Serialize;
use serde_json::{Map, Value};

/// Column the backend requires in every dataset.
pub const LABEL_COLUMN: &str = "label";

/// Rows kept for the preview.
const HEAD_ROWS: usize = 3;

/// Shape of a CSV dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub num_rows: usize,
    pub columns: Vec<String>,
    /// First rows as `column -> cell` objects.
    pub head: Vec<Map<String, Value>>,
    pub has_label_column: bool,
}

impl DatasetSummary {
    /// Parses CSV bytes with a header row.
    ///
    /// Numeric cells come back as JSON numbers, everything else as strings.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, csv::Error> {
        let mut reader = csv::Reader::from_reader(bytes);
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut num_rows = 0;
        let mut head = Vec::new();
        for record in reader.records() {
            let record = record?;
            if head.len() < HEAD_ROWS {
                head.push(
                    columns
                        .iter()
                        .zip(record.iter())
                        .map(|(column, cell)| (column.clone(), cell_value(cell)))
                        .collect(),
                );
            }
            num_rows += 1;
        }

        Ok(Self {
            has_label_column: columns.iter().any(|c| c == LABEL_COLUMN),
            num_rows,
            columns,
            head,
        })
    }
}

fn cell_value(cell: &str) -> Value {
    if let Ok(int) = cell.parse::<i64>() {
        return Value::from(int);
    }
    cell.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map_or_else(|| Value::String(cell.to_string()), Value::Number)
}
