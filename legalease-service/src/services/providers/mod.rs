//! AI provider abstractions and implementations.
//!
//! The assistant only needs plain text generation, so a provider is anything
//! that turns one prompt into one block of text (Gemini in production, a mock
//! in tests).

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use service_core::retry::Retryable;
use std::time::Duration;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Timed out after {0}s")]
    Timeout(u64),
}

impl ProviderError {
    /// Timeout after `limit`, reported in whole seconds rounded up and never 0.
    pub fn timed_out(limit: Duration) -> Self {
        let secs = limit.as_secs() + u64::from(limit.subsec_nanos() > 0);
        ProviderError::Timeout(secs.max(1))
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::Timeout(_) => "timeout",
        }
    }
}

impl Retryable for ProviderError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited | ProviderError::NetworkError(_) | ProviderError::Timeout(_)
        )
    }
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

impl FinishReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishReason::Complete => "complete",
            FinishReason::Length => "length",
            FinishReason::ContentFilter => "content_filter",
        }
    }
}

/// Text produced for one prompt.
#[derive(Debug, Clone)]
pub struct Generation {
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    pub finish_reason: FinishReason,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name used in logs and metrics.
    fn name(&self) -> &str;

    /// Model the provider sends requests to.
    fn model(&self) -> &str;

    /// Generate a response for a single prompt.
    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors_are_retryable() {
        assert!(ProviderError::RateLimited.is_retryable());
        assert!(ProviderError::Timeout(30).is_retryable());
        assert!(ProviderError::NetworkError("connection reset".into()).is_retryable());
    }

    #[test]
    fn test_permanent_errors_are_not_retryable() {
        assert!(!ProviderError::NotConfigured("no key".into()).is_retryable());
        assert!(!ProviderError::ApiError("400 Bad Request".into()).is_retryable());
        assert!(!ProviderError::ContentFiltered.is_retryable());
    }

    #[test]
    fn test_timeout_rounds_up_to_whole_seconds() {
        assert_eq!(ProviderError::timed_out(Duration::from_millis(20)), ProviderError::Timeout(1));
        assert_eq!(ProviderError::timed_out(Duration::ZERO), ProviderError::Timeout(1));
        assert_eq!(ProviderError::timed_out(Duration::from_secs(60)), ProviderError::Timeout(60));
        assert_eq!(ProviderError::timed_out(Duration::from_millis(1500)), ProviderError::Timeout(2));
    }

    #[test]
    fn test_error_messages_preserve_detail() {
        let err = ProviderError::ApiError("Gemini API error 403: quota".into());
        assert_eq!(err.to_string(), "API error: Gemini API error 403: quota");
    }
}
