use thiserror::Error;

/// Underlying cause of a failed analysis request.
///
/// Logged, never shown to the user; see [`AnalysisFailure`](super::AnalysisFailure).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("credential not found: environment variable {var} is not set")]
    Configuration { var: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("upstream error: {0}")]
    Upstream(String),
}

impl AnalysisError {
    /// Short category name for logs and the error history.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Configuration { .. } => "configuration",
            AnalysisError::Network(_) => "network",
            AnalysisError::Upstream(_) => "upstream",
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AnalysisError::Upstream(e.to_string())
        } else {
            AnalysisError::Network(e.to_string())
        }
    }
}
