//! Command implementations for the auditor CLI.

pub mod audit;
pub mod dataset;
pub mod inspect;
pub mod ping;

use anyhow::Context;
use auditor_core::{AuditorError, FileUpload, RecordingView};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Exit code when required uploads are missing.
pub const EXIT_MISSING_INPUT: i32 = 2;

/// Reads an optional upload path. An absent path stays absent.
pub fn read_upload(path: Option<&Path>) -> anyhow::Result<Option<FileUpload>> {
    path.map(|p| {
        FileUpload::from_path(p).with_context(|| format!("Failed to read file {}", p.display()))
    })
    .transpose()
}

/// Turns a workflow outcome into the process result.
///
/// Missing inputs have already been alerted, so they end the process with
/// [`EXIT_MISSING_INPUT`] instead of a second error message.
pub fn finish<T>(outcome: Result<T, AuditorError>) -> anyhow::Result<T> {
    match outcome {
        Ok(report) => Ok(report),
        Err(AuditorError::MissingInput(_)) => std::process::exit(EXIT_MISSING_INPUT),
        Err(e) => Err(e.into()),
    }
}

/// Prints alerts the workflow raised to stderr.
pub fn print_alerts(view: &RecordingView) {
    for alert in &view.alerts {
        eprintln!("{}", alert);
    }
}

/// The JSON document printed by `--json`: one key per endpoint result plus
/// the charts drawn during the run, keyed by chart target.
pub fn json_document<T: Serialize>(report: &T, view: &RecordingView) -> anyhow::Result<Map<String, Value>> {
    let Value::Object(mut document) = serde_json::to_value(report)? else {
        anyhow::bail!("Report is not a JSON object");
    };
    document.insert("charts".to_string(), serde_json::to_value(&view.charts)?);
    Ok(document)
}

pub fn print_json(document: &Map<String, Value>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(document)?);
    Ok(())
}
