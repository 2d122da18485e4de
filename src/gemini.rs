//! Client for the generative-language `generateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CommentError;
use crate::generator::{SamplingParams, TextGenerator};
use crate::settings::Settings;

pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Carries the API key. Request URLs never contain it.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Models tried in order until one answers.
pub const DEFAULT_MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.5-flash-lite", "gemini-2.0-flash"];

const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: WireGenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateContentRequest {
    pub fn new(prompt: &str, params: &SamplingParams) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: WireGenerationConfig {
                temperature: params.temperature,
                top_k: params.top_k,
                top_p: params.top_p,
                max_output_tokens: params.max_output_tokens,
                candidate_count: 1,
            },
            safety_settings: ["HARM_CATEGORY_HARASSMENT", "HARM_CATEGORY_HATE_SPEECH"]
                .iter()
                .map(|category| SafetySetting {
                    category: category.to_string(),
                    threshold: SAFETY_THRESHOLD.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    pub candidate_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Trimmed text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .map(str::trim)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    models: Vec<String>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, CommentError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| CommentError::Network(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        })
    }

    /// Client for the key in `settings`. Fails before any request is built
    /// when no key is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self, CommentError> {
        let key = settings.api_key().ok_or(CommentError::MissingApiKey)?;
        Self::new(key)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// One `generateContent` call against one model.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, CommentError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!(model, "calling generateContent");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| CommentError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CommentError::Network(e.without_url().to_string()))?;

        debug!(model, status = status.as_u16(), "generateContent responded");

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(e) => e.error.message,
                Err(_) if body.trim().is_empty() => format!("HTTP {}", status.as_u16()),
                Err(_) => body,
            };
            return Err(CommentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        match parsed.first_text() {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(CommentError::EmptyUpstreamResult),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    /// Try each model in turn; the last model's error is returned.
    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String, CommentError> {
        let request = GenerateContentRequest::new(prompt, params);
        let mut last_error = CommentError::EmptyUpstreamResult;

        for model in &self.models {
            match self.generate_content(model, &request).await {
                Ok(text) => {
                    debug!(model = %model, chars = text.chars().count(), "completion received");
                    return Ok(text);
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "model failed, trying next");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
