//! HTTP client for the chat-completions insight endpoint.
//!
//! One request per insight, no retries. The caller decides what a failed
//! generation means for its response.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use healthwatch_core::{Patient, VitalsRecord};

use crate::error::InsightError;
use crate::prompt::{build_prompt, fallback_insight};

const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";
const MAX_TOKENS: u32 = 150;

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Use [`InsightClient::new`] for production or
/// [`InsightClient::with_base_url`] to point at a mock server in tests.
pub struct InsightClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl InsightClient {
    /// Creates a client pointed at the production inference router.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, InsightError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, InsightError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }

    /// Generates a caregiver insight for the given vitals snapshot.
    ///
    /// An empty completion degrades to the rule-based fallback paragraph;
    /// everything else non-2xx or malformed is a typed error.
    ///
    /// # Errors
    ///
    /// - [`InsightError::UnexpectedStatus`] on a non-2xx response.
    /// - [`InsightError::Http`] on network failure or timeout.
    /// - [`InsightError::Deserialize`] if the response does not match the
    ///   chat-completions shape.
    pub async fn generate(
        &self,
        patient: &Patient,
        vitals: &VitalsRecord,
    ) -> Result<String, InsightError> {
        let prompt = build_prompt(patient, vitals);
        let url = format!("{}/chat/completions", self.base_url);

        tracing::info!(
            model = %self.model,
            at_risk = vitals.is_at_risk(),
            "requesting caregiver insight"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [{ "role": "user", "content": prompt }],
                "max_tokens": MAX_TOKENS,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InsightError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| InsightError::Deserialize {
                context: url.clone(),
                source: e,
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_owned())
            .unwrap_or_default();

        if content.is_empty() {
            tracing::warn!("insight completion was empty, using rule-based fallback");
            return Ok(fallback_insight(patient, vitals));
        }

        tracing::debug!("insight completion received");
        Ok(content)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}
