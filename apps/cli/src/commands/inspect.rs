//! Inspect command implementation.
//!
//! Previews a CSV dataset locally, without contacting the backend.

use anyhow::Context;
use auditor_core::DatasetSummary;
use auditor_core::preview::LABEL_COLUMN;
use colored::Colorize;
use comfy_table::Table;
use std::path::Path;

/// Execute the inspect command.
pub fn execute(file: &Path, json_output: bool) -> anyhow::Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("Failed to read file {}", file.display()))?;
    let summary = DatasetSummary::from_csv(&bytes)
        .with_context(|| format!("Failed to parse CSV {}", file.display()))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", format!("Dataset: {}", file.display()).bold().cyan());
    println!("  Rows:    {}", summary.num_rows);
    println!("  Columns: {}", summary.columns.join(", "));
    if summary.has_label_column {
        println!("  Label:   {}", format!("✓ '{}' column present", LABEL_COLUMN).green());
    } else {
        println!(
            "  Label:   {}",
            format!("✗ CSV must include a '{}' column", LABEL_COLUMN).red()
        );
    }

    if !summary.head.is_empty() {
        let mut table = Table::new();
        table.set_header(summary.columns.clone());
        for row in &summary.head {
            table.add_row(summary.columns.iter().map(|column| {
                row.get(column).map_or_else(String::new, |value| match value {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
            }));
        }
        println!();
        println!("{}", table);
    }

    Ok(())
}
