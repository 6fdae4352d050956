//! Gemini AI provider implementation.
//!
//! Implements text generation using Google's Gemini REST API, including the
//! startup model discovery that picks a model the key can actually use.

use super::{FinishReason, Generation, ProviderError, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";
const GENERATE_CONTENT: &str = "generateContent";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: SecretString,
    /// Preferred model, e.g. `gemini-1.5-flash`.
    pub model: String,
    /// Tried in order when discovery finds the preferred model unavailable.
    pub fallback_models: Vec<String>,
    /// List the account's models at startup to validate the choice.
    pub discover_models: bool,
    pub request_timeout: Duration,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
            fallback_models: Vec::new(),
            discover_models: true,
            request_timeout: Duration::from_secs(60),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl std::fmt::Debug for GeminiTextProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiTextProvider")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        if config.api_key.expose_secret().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Build the provider and, if enabled, settle on a model the key can use.
    pub async fn connect(config: GeminiConfig) -> Result<Self, ProviderError> {
        let mut provider = Self::new(config)?;
        if provider.config.discover_models {
            provider.discover_model().await;
        }
        Ok(provider)
    }

    /// Replace the configured model with the best available one.
    ///
    /// A failed listing keeps the configured model; the first generation call
    /// will surface any real problem with it.
    pub async fn discover_model(&mut self) {
        match self.list_models().await {
            Ok(available) => {
                tracing::info!(
                    models = ?available,
                    "Gemini models supporting generateContent"
                );
                match select_model(&available, &self.config.model, &self.config.fallback_models)
                {
                    Some(model) if model != self.config.model => {
                        tracing::warn!(
                            requested = %self.config.model,
                            selected = %model,
                            "Configured Gemini model unavailable, using fallback"
                        );
                        self.config.model = model;
                    }
                    Some(_) => {}
                    None => {
                        tracing::warn!(
                            model = %self.config.model,
                            "No Gemini model supports generateContent, keeping configured model"
                        );
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    model = %self.config.model,
                    error = %e,
                    "Could not list Gemini models, keeping configured model"
                );
            }
        }
    }

    /// Models (without the `models/` prefix) that support `generateContent`.
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/models?pageSize=1000", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "Listing models failed: {}",
                response.status()
            )));
        }

        let listing: ListModelsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse model list: {}", e)))?;

        Ok(listing
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == GENERATE_CONTENT)
            })
            .map(|m| m.name.trim_start_matches("models/").to_string())
            .collect())
    }

    /// Build the API URL for the configured model and method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url, self.config.model, method
        )
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::timed_out(self.config.request_timeout)
        } else {
            ProviderError::NetworkError(e.to_string())
        }
    }
}

/// Pick the preferred model if available, else the first available fallback,
/// else whatever is listed first.
pub fn select_model(available: &[String], preferred: &str, fallbacks: &[String]) -> Option<String> {
    if available.iter().any(|m| m == preferred) {
        return Some(preferred.to_string());
    }

    fallbacks
        .iter()
        .find(|candidate| available.contains(*candidate))
        .or_else(|| available.first())
        .cloned()
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url(GENERATE_CONTENT))
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        api_response.into_generation()
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        self.list_models().await.map(|_| ())
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

impl GenerateContentResponse {
    fn into_generation(self) -> Result<Generation, ProviderError> {
        if self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_ref())
            .is_some()
        {
            return Err(ProviderError::ContentFiltered);
        }

        let usage = self.usage_metadata.unwrap_or_default();
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ApiError("Gemini returned no candidates".to_string()))?;

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") => FinishReason::ContentFilter,
            _ => FinishReason::Complete,
        };

        if finish_reason == FinishReason::ContentFilter {
            return Err(ProviderError::ContentFiltered);
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::ApiError(
                "Gemini returned an empty response".to_string(),
            ));
        }

        Ok(Generation {
            text,
            input_tokens: usage.prompt_token_count.unwrap_or(0),
            output_tokens: usage.candidates_token_count.unwrap_or(0),
            finish_reason,
        })
    }
}
