//! Dataset command implementation.

use super::{finish, json_document, print_alerts, print_json, read_upload};
use crate::terminal_view::TerminalView;
use auditor_core::{AuditClient, ClientOptions, RecordingView, UploadAndReportClient};
use std::path::PathBuf;

/// Execute the dataset command.
///
/// Uploads the dataset to the dataset, fairness, and mitigation endpoints.
pub async fn execute(file: Option<PathBuf>, options: &ClientOptions, json_output: bool) -> anyhow::Result<()> {
    let upload = read_upload(file.as_deref())?;
    let client = AuditClient::new(options)?;

    if json_output {
        let mut controller = UploadAndReportClient::new(client, RecordingView::new());
        let outcome = controller.submit_dataset_analysis(upload).await;
        print_alerts(controller.view());
        let report = finish(outcome)?;
        print_json(&json_document(&report, controller.view())?)
    } else {
        let mut controller = UploadAndReportClient::new(client, TerminalView::stdio());
        let outcome = controller.submit_dataset_analysis(upload).await;
        controller.into_view().finish()?;
        finish(outcome).map(|_| ())
    }
}
