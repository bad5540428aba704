//! The fixed set of backend endpoints.

use std::fmt;

/// A backend endpoint accepting a multipart upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Dataset bias analysis (`file`)
    AnalyzeDataset,
    /// Fairness metrics (`file`)
    AnalyzeFairness,
    /// Bias mitigation (`file`)
    Mitigate,
    /// Model audit (`file`)
    AnalyzeModel,
    /// SHAP explanation (`file`)
    ExplainShap,
    /// LIME explanation (`file`)
    ExplainLime,
    /// Privacy analysis (`model`, `train`)
    AnalyzePrivacy,
}

impl Endpoint {
    /// Path relative to the backend base address.
    pub const fn path(self) -> &'static str {
        match self {
            Self::AnalyzeDataset => "/analyze/dataset",
            Self::AnalyzeFairness => "/analyze/fairness",
            Self::Mitigate => "/mitigate",
            Self::AnalyzeModel => "/analyze/model",
            Self::ExplainShap => "/explain/shap",
            Self::ExplainLime => "/explain/lime",
            Self::AnalyzePrivacy => "/analyze/privacy",
        }
    }

    /// Multipart field names the endpoint expects.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::AnalyzePrivacy => &["model", "train"],
            _ => &["file"],
        }
    }

    /// Full URL for this endpoint under `base_url`.
    pub fn url(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
