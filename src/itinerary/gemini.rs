use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use crate::config::GenerationConfig;
use crate::{Result, TripweaveError};

/// Completes a single prompt
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> Result<GenerateContentResponse>;
}

/// `generateContent` response body, reduced to what extraction reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Response carrying a single text part
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![Part {
                        text: Some(text.into()),
                    }],
                }),
            }],
        }
    }

    /// `candidates[0].content.parts[0].text`
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client; fails when no generation API key is configured
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                TripweaveError::config("generation.api_key is required to generate itineraries")
            })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("tripweave/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripweaveError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        })
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate_content(&self, prompt: &str) -> Result<GenerateContentResponse> {
        let start_time = Instant::now();
        debug!("Sending generation request to {}", self.endpoint());

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await
            .map_err(|e| TripweaveError::provider(format!("Generation request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TripweaveError::provider(format!(
                "Generation API error {status}: {error_text}"
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            TripweaveError::provider(format!("Failed to parse generation response: {e}"))
        })?;

        info!(
            "Generation completed in {:.3}s with {} candidate(s)",
            start_time.elapsed().as_secs_f64(),
            body.candidates.len()
        );

        Ok(body)
    }
}
