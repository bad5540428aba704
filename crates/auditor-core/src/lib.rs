//! Auditor Core - upload-and-report client for the ethics auditor backend.
//!
//! This crate provides:
//! - A fail-soft HTTP client posting multipart uploads to the backend
//! - The dataset analysis and model audit workflows, fanned out concurrently
//! - Chart models (pie, bar, heatmap, gauge) extracted from responses
//! - A view trait the workflows write results into
//!
//! # Example
//!
//! ```rust,no_run
//! use auditor_core::{AuditClient, AuditorConfig, FileUpload, RecordingView, UploadAndReportClient};
//! use std::path::Path;
//!
//! # async fn example() -> auditor_core::Result<()> {
//! let options = AuditorConfig::discover_and_load().client_options()?;
//! let mut client = UploadAndReportClient::new(AuditClient::new(&options)?, RecordingView::new());
//!
//! let dataset = FileUpload::from_path(Path::new("dataset.csv"))?;
//! let report = client.submit_dataset_analysis(Some(dataset)).await?;
//! println!("{}", report.dataset.pretty());
//! # Ok(())
//! # }
//! ```

pub mod charts;
pub mod client;
pub mod config;
pub mod controller;
pub mod endpoint;
pub mod error;
pub mod fanout;
pub mod payload;
pub mod preview;
pub mod result;
pub mod transport;
pub mod view;

pub use charts::{BandColor, BarChart, Chart, DataPoint, Gauge, GaugeBand, Heatmap, PieChart};
pub use client::AuditClient;
pub use config::{AuditorConfig, ClientOptions, ConfigError};
pub use controller::{AuditReport, DatasetReport, UploadAndReportClient};
pub use endpoint::Endpoint;
pub use error::{AuditorError, Result};
pub use fanout::TaskGroup;
pub use payload::{FileUpload, RequestPayload};
pub use preview::DatasetSummary;
pub use result::EndpointResult;
pub use transport::{HttpTransport, Transport};
pub use view::{ChartTarget, RecordingView, Region, ReportView};
