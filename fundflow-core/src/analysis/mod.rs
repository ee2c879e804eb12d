//! AI analyst: prompt, text-generation client, failure mapping and lifecycle.

pub mod client;
pub mod error;
pub mod prompt;
pub mod session;

pub use client::{GeminiClient, GenerationRequest, TextGenerator};
pub use error::AnalysisError;
pub use prompt::{render_prompt, sample_history, SYSTEM_INSTRUCTION};
pub use session::{AnalysisSession, AnalysisState, Resolution, SessionError, Ticket};

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::AnalysisConfig;
use crate::domain::{Fund, HistoricalPoint};

/// The only message a user ever sees for a failed analysis.
pub const FAILURE_MESSAGE: &str = "Failed to generate analysis. Please try again.";

/// Uniform user-facing failure. The underlying [`AnalysisError`] is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", FAILURE_MESSAGE)]
pub struct AnalysisFailure;

/// Renders the prompt for a fund and asks a [`TextGenerator`] for the narrative.
#[derive(Clone)]
pub struct FundAnalyst {
    generator: Arc<dyn TextGenerator>,
    model: String,
    sample_every: usize,
}

impl FundAnalyst {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
            sample_every: 3,
        }
    }

    pub fn with_sample_every(mut self, every: usize) -> Self {
        self.sample_every = every.max(1);
        self
    }

    /// Analyst backed by the Gemini client described by `config`.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let client = GeminiClient::new(
            config.endpoint.clone(),
            config.api_key_env.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self::new(Arc::new(client), config.model.clone())
            .with_sample_every(config.sample_every))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The request that `analyze` would send.
    pub fn request_for(&self, fund: &Fund, history: &[HistoricalPoint]) -> GenerationRequest {
        GenerationRequest {
            model: self.model.clone(),
            prompt: render_prompt(fund, history, self.sample_every),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
        }
    }

    /// Generate the narrative for `fund`. Text is returned verbatim.
    pub fn analyze(
        &self,
        fund: &Fund,
        history: &[HistoricalPoint],
    ) -> Result<String, AnalysisFailure> {
        let request = self.request_for(fund, history);
        match self.generator.generate(&request) {
            Ok(text) => {
                tracing::info!(code = %fund.code, generator = self.generator.name(), chars = text.len(), "analysis generated");
                Ok(text)
            }
            Err(e) => {
                tracing::error!(code = %fund.code, generator = self.generator.name(), kind = e.kind(), error = %e, "analysis request failed");
                Err(AnalysisFailure)
            }
        }
    }
}

impl std::fmt::Debug for FundAnalyst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundAnalyst")
            .field("generator", &self.generator.name())
            .field("model", &self.model)
            .field("sample_every", &self.sample_every)
            .finish()
    }
}
