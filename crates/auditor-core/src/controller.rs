//! The two upload workflows: dataset analysis and model audit.

use crate::charts::{BarChart, Chart, Gauge, Heatmap, PieChart};
use crate::client::AuditClient;
use crate::endpoint::Endpoint;
use crate::error::{AuditorError, Result};
use crate::fanout::{Joined, TaskGroup};
use crate::payload::{FileUpload, RequestPayload};
use crate::result::{EndpointResult, pretty_json};
use crate::view::{ChartTarget, Region, ReportView};
use serde::Serialize;
use serde_json::json;
use tracing::info;

/// Alert shown when the dataset workflow has no file.
pub const MISSING_DATASET_ALERT: &str = "Please select a dataset file.";

/// Alert shown when the audit workflow lacks either file.
pub const MISSING_AUDIT_FILES_ALERT: &str = "Please select both a model file and a training file.";

/// Results of one dataset submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    pub dataset: EndpointResult,
    pub fairness: EndpointResult,
    pub mitigation: EndpointResult,
}

/// Results of one model audit submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub model: EndpointResult,
    pub shap: EndpointResult,
    pub lime: EndpointResult,
    pub privacy: EndpointResult,
}

impl AuditReport {
    /// SHAP and LIME side by side, as displayed in the explanation region.
    pub fn explanations(&self) -> serde_json::Value {
        json!({ "SHAP": self.shap.to_value(), "LIME": self.lime.to_value() })
    }
}

/// Runs upload workflows against the backend and writes results into a view.
#[derive(Debug)]
pub struct UploadAndReportClient<V> {
    client: AuditClient,
    view: V,
}

impl<V: ReportView> UploadAndReportClient<V> {
    pub fn new(client: AuditClient, view: V) -> Self {
        Self { client, view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Sends one dataset to the dataset, fairness, and mitigation endpoints.
    ///
    /// All three calls run concurrently and are displayed once every call
    /// has settled. A missing file alerts the view and sends nothing.
    pub async fn submit_dataset_analysis(&mut self, file: Option<FileUpload>) -> Result<DatasetReport> {
        let Some(file) = file else {
            self.view.alert(MISSING_DATASET_ALERT);
            return Err(AuditorError::MissingInput("dataset file".to_string()));
        };

        let payload = RequestPayload::for_endpoint(Endpoint::AnalyzeDataset, [file]);
        let endpoints = [Endpoint::AnalyzeDataset, Endpoint::AnalyzeFairness, Endpoint::Mitigate];

        let mut group = TaskGroup::new();
        for endpoint in endpoints {
            group.spawn(endpoint, self.client.call_endpoint(endpoint, &payload));
        }
        let mut joined = group.join().await;

        let report = DatasetReport {
            dataset: take(&mut joined, Endpoint::AnalyzeDataset),
            fairness: take(&mut joined, Endpoint::AnalyzeFairness),
            mitigation: take(&mut joined, Endpoint::Mitigate),
        };

        self.view.show_result(Region::Dataset, &report.dataset.pretty());
        self.draw_pie(&report.dataset);

        self.view.show_result(Region::Fairness, &report.fairness.pretty());
        self.draw_bar(&report.fairness);

        self.view.show_result(Region::Mitigation, &report.mitigation.pretty());

        info!(
            failures = count_failures(&[&report.dataset, &report.fairness, &report.mitigation]),
            "Dataset analysis complete"
        );
        Ok(report)
    }

    /// Sends a model to the model, SHAP, and LIME endpoints, and the model
    /// with its training data to the privacy endpoint.
    ///
    /// The four calls run concurrently. Missing files alert the view and
    /// send nothing.
    pub async fn submit_model_audit(
        &mut self,
        model: Option<FileUpload>,
        train: Option<FileUpload>,
    ) -> Result<AuditReport> {
        let (Some(model), Some(train)) = (model, train) else {
            self.view.alert(MISSING_AUDIT_FILES_ALERT);
            return Err(AuditorError::MissingInput("model and training files".to_string()));
        };

        let model_payload = RequestPayload::for_endpoint(Endpoint::AnalyzeModel, [model.clone()]);
        let privacy_payload = RequestPayload::for_endpoint(Endpoint::AnalyzePrivacy, [model, train]);

        let mut group = TaskGroup::new();
        for endpoint in [Endpoint::AnalyzeModel, Endpoint::ExplainShap, Endpoint::ExplainLime] {
            group.spawn(endpoint, self.client.call_endpoint(endpoint, &model_payload));
        }
        group.spawn(
            Endpoint::AnalyzePrivacy,
            self.client.call_endpoint(Endpoint::AnalyzePrivacy, &privacy_payload),
        );
        let mut joined = group.join().await;

        let report = AuditReport {
            model: take(&mut joined, Endpoint::AnalyzeModel),
            shap: take(&mut joined, Endpoint::ExplainShap),
            lime: take(&mut joined, Endpoint::ExplainLime),
            privacy: take(&mut joined, Endpoint::AnalyzePrivacy),
        };

        self.view.show_result(Region::Model, &report.model.pretty());
        self.draw_heatmap(&report.model);

        self.view.show_result(Region::Explanation, &pretty_json(&report.explanations()));

        self.view.show_result(Region::Privacy, &report.privacy.pretty());
        self.draw_gauge(&report.privacy);

        info!(
            failures = count_failures(&[&report.model, &report.shap, &report.lime, &report.privacy]),
            "Model audit complete"
        );
        Ok(report)
    }

    fn draw_pie(&mut self, result: &EndpointResult) {
        if let Some(pie) = PieChart::from_result(result) {
            self.view.draw_chart(ChartTarget::ClassDistribution, &Chart::Pie(pie));
        }
    }

    fn draw_bar(&mut self, result: &EndpointResult) {
        if let Some(bar) = BarChart::from_result(result) {
            self.view.draw_chart(ChartTarget::GroupAccuracy, &Chart::Bar(bar));
        }
    }

    fn draw_heatmap(&mut self, result: &EndpointResult) {
        if let Some(heatmap) = Heatmap::from_result(result) {
            self.view.draw_chart(ChartTarget::ConfusionMatrix, &Chart::Heatmap(heatmap));
        }
    }

    fn draw_gauge(&mut self, result: &EndpointResult) {
        let Some(gauge) = Gauge::from_result(result) else {
            return;
        };
        if !self.view.has_chart_container(ChartTarget::PrivacyGauge) {
            self.view.create_chart_container(ChartTarget::PrivacyGauge);
        }
        self.view.draw_chart(ChartTarget::PrivacyGauge, &Chart::Gauge(gauge));
    }
}

// Every spawned endpoint yields exactly one output.
fn take(joined: &mut Joined<Endpoint, EndpointResult>, endpoint: Endpoint) -> EndpointResult {
    joined
        .take(&endpoint)
        .unwrap_or_else(|| EndpointResult::failure(format!("No result for {}", endpoint)))
}

fn count_failures(results: &[&EndpointResult]) -> usize {
    results.iter().filter(|r| matches!(r, EndpointResult::Failure(_))).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Transport;
    use crate::view::RecordingView;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Transport that answers from a table and records what it was asked.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: HashMap<Endpoint, std::result::Result<Value, String>>,
        calls: Mutex<Vec<(Endpoint, Vec<String>)>>,
    }

    impl ScriptedTransport {
        fn reply(mut self, endpoint: Endpoint, value: Value) -> Self {
            self.replies.insert(endpoint, Ok(value));
            self
        }

        fn fail(mut self, endpoint: Endpoint, message: &str) -> Self {
            self.replies.insert(endpoint, Err(message.to_string()));
            self
        }

        fn calls(&self) -> Vec<(Endpoint, Vec<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn post_multipart(&self, endpoint: Endpoint, payload: &RequestPayload) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint, payload.fields().map(str::to_string).collect()));
            match self.replies.get(&endpoint) {
                Some(Ok(value)) => Ok(value.clone()),
                Some(Err(message)) => Err(AuditorError::Request(message.clone())),
                None => Ok(json!({})),
            }
        }

        async fn get_root(&self) -> Result<Value> {
            Ok(json!({}))
        }
    }

    fn controller(transport: &Arc<ScriptedTransport>) -> UploadAndReportClient<RecordingView> {
        let transport: Arc<dyn Transport> = transport.clone();
        UploadAndReportClient::new(AuditClient::with_transport(transport), RecordingView::new())
    }

    fn dataset() -> Option<FileUpload> {
        Some(FileUpload::new("dataset.csv", "label\nA\nB\n"))
    }

    fn model() -> Option<FileUpload> {
        Some(FileUpload::new("model.pkl", vec![0x80u8, 0x04]))
    }

    fn train() -> Option<FileUpload> {
        Some(FileUpload::new("train.csv", "x,label\n1,0\n"))
    }

    #[tokio::test]
    async fn test_missing_dataset_alerts_without_calls() {
        let transport = Arc::new(ScriptedTransport::default());
        let mut client = controller(&transport);

        let result = client.submit_dataset_analysis(None).await;

        assert!(matches!(result, Err(AuditorError::MissingInput(_))));
        assert_eq!(client.view().alerts, vec![MISSING_DATASET_ALERT.to_string()]);
        assert!(client.view().regions.is_empty());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_audit_file_alerts_without_calls() {
        let transport = Arc::new(ScriptedTransport::default());
        let mut client = controller(&transport);

        assert!(client.submit_model_audit(model(), None).await.is_err());
        assert!(client.submit_model_audit(None, train()).await.is_err());

        assert_eq!(client.view().alerts.len(), 2);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dataset_scenario() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .reply(Endpoint::AnalyzeDataset, json!({"class_counts": {"A": 10, "B": 5}}))
                .reply(Endpoint::AnalyzeFairness, json!({"group_accuracies": {"g1": 0.9}}))
                .reply(Endpoint::Mitigate, json!({})),
        );
        let mut client = controller(&transport);

        let report = client.submit_dataset_analysis(dataset()).await.unwrap();
        let view = client.view();

        for region in [Region::Dataset, Region::Fairness, Region::Mitigation] {
            assert!(view.is_visible(region));
        }
        assert_eq!(view.body(Region::Mitigation), Some("{}"));
        assert_eq!(report.mitigation, EndpointResult::Success(json!({})));

        match view.chart(ChartTarget::ClassDistribution) {
            Some(Chart::Pie(pie)) => assert_eq!(pie.slices.len(), 2),
            other => panic!("Expected pie chart, got {:?}", other),
        }
        match view.chart(ChartTarget::GroupAccuracy) {
            Some(Chart::Bar(bar)) => assert_eq!(bar.bars.len(), 1),
            other => panic!("Expected bar chart, got {:?}", other),
        }

        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(_, fields)| fields == &vec!["file".to_string()]));
    }

    #[tokio::test]
    async fn test_one_failure_does_not_affect_others() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .reply(Endpoint::AnalyzeDataset, json!({"class_counts": {"A": 1}}))
                .fail(Endpoint::AnalyzeFairness, "connection reset"),
        );
        let mut client = controller(&transport);

        let report = client.submit_dataset_analysis(dataset()).await.unwrap();
        let view = client.view();

        assert!(report.fairness.is_error());
        let shown: Value = serde_json::from_str(view.body(Region::Fairness).unwrap()).unwrap();
        assert_eq!(shown, json!({"error": "Request error: connection reset"}));
        assert!(view.chart(ChartTarget::GroupAccuracy).is_none());

        assert!(view.chart(ChartTarget::ClassDistribution).is_some());
        assert!(view.is_visible(Region::Mitigation));
    }

    #[tokio::test]
    async fn test_model_audit_issues_four_calls() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .reply(Endpoint::AnalyzeModel, json!({"confusion_matrix": [[3, 1], [0, 4]]}))
                .reply(Endpoint::ExplainShap, json!({"shap": [0.1]}))
                .fail(Endpoint::ExplainLime, "timeout")
                .reply(Endpoint::AnalyzePrivacy, json!({"differential_privacy_epsilon": 3.2})),
        );
        let mut client = controller(&transport);

        let report = client.submit_model_audit(model(), train()).await.unwrap();
        let view = client.view();

        let mut calls = transport.calls();
        calls.sort_by_key(|(endpoint, _)| endpoint.path());
        assert_eq!(calls.len(), 4);
        let privacy_fields = calls
            .iter()
            .find(|(e, _)| *e == Endpoint::AnalyzePrivacy)
            .map(|(_, f)| f.clone())
            .unwrap();
        assert_eq!(privacy_fields, vec!["model".to_string(), "train".to_string()]);

        let explanation: Value = serde_json::from_str(view.body(Region::Explanation).unwrap()).unwrap();
        assert_eq!(explanation["SHAP"], json!({"shap": [0.1]}));
        assert_eq!(explanation["LIME"], json!({"error": "Request error: timeout"}));
        assert_eq!(explanation, report.explanations());

        assert!(matches!(view.chart(ChartTarget::ConfusionMatrix), Some(Chart::Heatmap(_))));
        match view.chart(ChartTarget::PrivacyGauge) {
            Some(Chart::Gauge(gauge)) => assert_eq!(gauge.value, 3.2),
            other => panic!("Expected gauge, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_marked_confusion_matrix_draws_no_heatmap() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .reply(Endpoint::AnalyzeModel, json!({"confusion_matrix": [[1]], "error": "x"})),
        );
        let mut client = controller(&transport);

        let report = client.submit_model_audit(model(), train()).await.unwrap();
        let view = client.view();

        assert!(report.model.is_error());
        assert!(view.chart(ChartTarget::ConfusionMatrix).is_none());
        let shown: Value = serde_json::from_str(view.body(Region::Model).unwrap()).unwrap();
        assert_eq!(shown, json!({"confusion_matrix": [[1]], "error": "x"}));
    }

    #[tokio::test]
    async fn test_enveloped_responses_still_chart() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .reply(
                    Endpoint::AnalyzeModel,
                    json!({
                        "success": true,
                        "data": {"model_bias": {"confusion_matrix": [[8, 2], [1, 9]]}},
                        "error": null
                    }),
                )
                .reply(
                    Endpoint::AnalyzePrivacy,
                    json!({
                        "success": true,
                        "data": {"privacy_analysis": {"differential_privacy_epsilon": 6.5}},
                        "error": null
                    }),
                ),
        );
        let mut client = controller(&transport);

        client.submit_model_audit(model(), train()).await.unwrap();
        let view = client.view();

        match view.chart(ChartTarget::ConfusionMatrix) {
            Some(Chart::Heatmap(heatmap)) => assert_eq!(heatmap.cells, vec![vec![8.0, 2.0], vec![1.0, 9.0]]),
            other => panic!("Expected heatmap, got {:?}", other),
        }
        match view.chart(ChartTarget::PrivacyGauge) {
            Some(Chart::Gauge(gauge)) => {
                assert_eq!(gauge.value, 6.5);
                assert_eq!(gauge.band().map(|b| b.color), Some(crate::charts::BandColor::Red));
            }
            other => panic!("Expected gauge, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_gauge_container_reused() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .reply(Endpoint::AnalyzePrivacy, json!({"differential_privacy_epsilon": 1.5})),
        );
        let mut client = controller(&transport);

        client.submit_model_audit(model(), train()).await.unwrap();
        client.submit_model_audit(model(), train()).await.unwrap();

        assert_eq!(client.view().containers_created.get(&ChartTarget::PrivacyGauge), Some(&1));
    }

    #[tokio::test]
    async fn test_no_gauge_without_numeric_epsilon() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .reply(Endpoint::AnalyzePrivacy, json!({"error": "Failed to load model"})),
        );
        let mut client = controller(&transport);

        client.submit_model_audit(model(), train()).await.unwrap();

        assert!(client.view().chart(ChartTarget::PrivacyGauge).is_none());
        assert!(client.view().containers_created.is_empty());
        assert!(client.view().is_visible(Region::Privacy));
    }

    #[tokio::test]
    async fn test_later_submission_overwrites() {
        let transport = Arc::new(
            ScriptedTransport::default().reply(Endpoint::Mitigate, json!({"mitigated_data": [1]})),
        );
        let mut client = controller(&transport);

        client.submit_dataset_analysis(dataset()).await.unwrap();
        client.submit_dataset_analysis(dataset()).await.unwrap();

        assert_eq!(transport.calls().len(), 6);
        assert_eq!(client.view().regions.len(), 3);
    }
}
