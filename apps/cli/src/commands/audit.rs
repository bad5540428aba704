//! Audit command implementation.

use super::{finish, json_document, print_alerts, print_json, read_upload};
use crate::terminal_view::TerminalView;
use auditor_core::{AuditClient, ClientOptions, RecordingView, UploadAndReportClient};
use std::path::PathBuf;

/// Execute the audit command.
///
/// Uploads the model for analysis and explanations, and the model with its
/// training data for the privacy check.
pub async fn execute(
    model: Option<PathBuf>,
    train: Option<PathBuf>,
    options: &ClientOptions,
    json_output: bool,
) -> anyhow::Result<()> {
    let model = read_upload(model.as_deref())?;
    let train = read_upload(train.as_deref())?;
    let client = AuditClient::new(options)?;

    if json_output {
        let mut controller = UploadAndReportClient::new(client, RecordingView::new());
        let outcome = controller.submit_model_audit(model, train).await;
        print_alerts(controller.view());
        let report = finish(outcome)?;

        let mut document = json_document(&report, controller.view())?;
        document.insert("explanation".to_string(), report.explanations());
        print_json(&document)
    } else {
        let mut controller = UploadAndReportClient::new(client, TerminalView::stdio());
        let outcome = controller.submit_model_audit(model, train).await;
        controller.into_view().finish()?;
        finish(outcome).map(|_| ())
    }
}
