//! Text-generation seam and the Gemini REST implementation.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::AnalysisError;

/// One generation call: model, prompt and system instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: String,
}

/// Anything that turns a prompt into narrative text.
///
/// The Gemini client is the production implementation; tests substitute
/// scripted generators.
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    fn generate(&self, request: &GenerationRequest) -> Result<String, AnalysisError>;
}

/// Gemini `generateContent` response, reduced to what we read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

/// Gemini REST client over a blocking reqwest client.
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key_env: String,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key_env: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fundflow/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AnalysisError::Network(format!("build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key_env: api_key_env.into(),
        })
    }

    /// Read the credential. Looked up on every call, never cached.
    fn api_key(&self) -> Result<String, AnalysisError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AnalysisError::Configuration {
                var: self.api_key_env.clone(),
            }),
        }
    }

    /// `{endpoint}/models/{model}:generateContent`
    pub(crate) fn generate_url(endpoint: &str, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            endpoint.trim_end_matches('/'),
            model
        )
    }

    pub(crate) fn request_body(request: &GenerationRequest) -> serde_json::Value {
        json!({
            "systemInstruction": {
                "parts": [{ "text": request.system_instruction }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }]
        })
    }

    /// Extract the narrative from a successful response body.
    ///
    /// Text parts of the first candidate are concatenated. No text at all
    /// (blocked prompt, empty candidate) is an upstream failure.
    pub(crate) fn parse_response(body: &str) -> Result<String, AnalysisError> {
        let resp: GenerateResponse = serde_json::from_str(body)
            .map_err(|e| AnalysisError::Upstream(format!("unparsable response: {e}")))?;

        if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AnalysisError::Upstream(format!("prompt blocked: {reason}")));
        }

        let candidate = resp
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::Upstream("response has no candidates".into()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
            return Err(AnalysisError::Upstream(format!(
                "empty response (finish reason: {reason})"
            )));
        }
        Ok(text)
    }

    /// Describe a non-success response, preferring the API's own message.
    pub(crate) fn describe_failure(status: u16, body: &str) -> AnalysisError {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(env) => AnalysisError::Upstream(format!(
                "HTTP {status} {}: {}",
                env.error.status, env.error.message
            )),
            Err(_) => AnalysisError::Upstream(format!("HTTP {status}")),
        }
    }
}

impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate(&self, request: &GenerationRequest) -> Result<String, AnalysisError> {
        let key = self.api_key()?;
        let url = Self::generate_url(&self.endpoint, &request.model);

        tracing::debug!(model = %request.model, prompt_len = request.prompt.len(), "sending analysis request");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&Self::request_body(request))
            .send()?;

        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(Self::describe_failure(status.as_u16(), &body));
        }
        Self::parse_response(&body)
    }
}
