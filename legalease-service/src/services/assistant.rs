//! Orchestration of one assistant exchange.
//!
//! A chat exchange records the user turn, builds the prompt from the history
//! that preceded it, calls the provider and records the reply. The one-shot
//! helpers (citation formatting, category detection) skip the store entirely.

use crate::models::{SessionId, Turn};
use crate::services::metrics;
use crate::services::prompt;
use crate::services::providers::{ProviderError, TextProvider};
use crate::services::session_store::SessionStore;
use service_core::error::AppError;
use service_core::retry::{retry_with_backoff, RetryConfig};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

pub const NOT_CONFIGURED_MESSAGE: &str =
    "Gemini API not configured. Please set GEMINI_API_KEY environment variable.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("{}", NOT_CONFIGURED_MESSAGE)]
    UpstreamUnavailable,

    #[error("{0}")]
    UpstreamFailure(String),

    #[error("AI provider did not respond within {0}s")]
    UpstreamTimeout(u64),
}

impl ChatError {
    fn outcome(&self) -> &'static str {
        match self {
            ChatError::Validation(_) => "validation_error",
            ChatError::UpstreamUnavailable => "unavailable",
            ChatError::UpstreamFailure(_) => "failure",
            ChatError::UpstreamTimeout(_) => "timeout",
        }
    }
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Validation(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            ChatError::UpstreamUnavailable | ChatError::UpstreamFailure(_) => {
                AppError::UpstreamError(err.to_string())
            }
            ChatError::UpstreamTimeout(secs) => AppError::GatewayTimeout(err.to_string(), Some(secs)),
        }
    }
}

/// The kinds of request the assistant sends to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Chat,
    Citation,
    Category,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Chat => "chat",
            Operation::Citation => "citation",
            Operation::Category => "category",
        }
    }

    fn failure_prefix(&self) -> &'static str {
        match self {
            Operation::Chat => "Error processing request",
            Operation::Citation => "Error formatting citation",
            Operation::Category => "Error analyzing category",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub message: String,
    pub session_id: SessionId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAnalysis {
    /// The analysed text, shortened for display.
    pub excerpt: String,
    pub analysis: String,
}

/// Characters of analysed text echoed back with a category analysis.
pub const EXCERPT_CHARS: usize = 100;

#[derive(Clone)]
pub struct Assistant {
    store: SessionStore,
    provider: Option<Arc<dyn TextProvider>>,
    request_timeout: Duration,
    retry: RetryConfig,
}

impl Assistant {
    pub fn new(
        store: SessionStore,
        provider: Option<Arc<dyn TextProvider>>,
        request_timeout: Duration,
        retry: RetryConfig,
    ) -> Self {
        Self {
            store,
            provider,
            request_timeout,
            retry,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn provider(&self) -> Option<&Arc<dyn TextProvider>> {
        self.provider.as_ref()
    }

    /// Run one chat exchange in `session_id`. The session is created by the
    /// first stored turn if the store does not know it yet.
    ///
    /// The user turn is stored before the provider is called and stays in the
    /// history even when the call fails. Nothing is stored when the provider is
    /// missing or the message is blank.
    pub async fn chat(
        &self,
        session_id: SessionId,
        message: &str,
        is_document: bool,
    ) -> Result<ChatReply, ChatError> {
        let Some(provider) = self.provider.as_ref() else {
            return Err(self.reject(Operation::Chat, ChatError::UpstreamUnavailable));
        };

        let message = message.trim();
        if message.is_empty() {
            return Err(self.reject(Operation::Chat, ChatError::Validation("Message cannot be empty")));
        }

        let history = self.store.get_history(&session_id);
        self.store
            .append_turn(&session_id, Turn::user(message, is_document));

        let prompt = prompt::build_prompt(message, &history);
        info!(
            session_id = %session_id,
            history_len = history.len(),
            prompt_len = prompt.len(),
            is_document,
            "Processing chat message"
        );

        let text = self
            .generate(provider.as_ref(), Operation::Chat, &prompt)
            .await?;

        self.store
            .append_turn(&session_id, Turn::assistant(text.clone()));

        Ok(ChatReply {
            message: text,
            session_id,
        })
    }

    /// Drop everything stored for `session_id`.
    pub fn clear(&self, session_id: &SessionId) {
        self.store.clear_session(session_id);
    }

    /// Ask the provider to format a legal citation. Returns its text verbatim.
    pub async fn format_citation(&self, citation: &str) -> Result<String, ChatError> {
        let citation = citation.trim();
        if citation.is_empty() {
            return Err(self.reject(
                Operation::Citation,
                ChatError::Validation("Citation text required"),
            ));
        }

        let provider = self.require_provider(Operation::Citation)?;
        self.generate(provider, Operation::Citation, &prompt::citation_prompt(citation))
            .await
    }

    /// Ask the provider which legal category `text` belongs to.
    pub async fn analyze_category(&self, text: &str) -> Result<CategoryAnalysis, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(self.reject(Operation::Category, ChatError::Validation("Text required")));
        }

        let provider = self.require_provider(Operation::Category)?;
        let analysis = self
            .generate(provider, Operation::Category, &prompt::category_prompt(text))
            .await?;

        Ok(CategoryAnalysis {
            excerpt: excerpt(text),
            analysis,
        })
    }

    fn require_provider(&self, operation: Operation) -> Result<&dyn TextProvider, ChatError> {
        match self.provider.as_ref() {
            Some(provider) => Ok(provider.as_ref()),
            None => Err(self.reject(operation, ChatError::UpstreamUnavailable)),
        }
    }

    fn reject(&self, operation: Operation, err: ChatError) -> ChatError {
        metrics::record_genai_request(operation.as_str(), err.outcome());
        err
    }

    /// Call the provider, bounding every attempt by the request timeout and
    /// retrying transient failures.
    async fn generate(
        &self,
        provider: &dyn TextProvider,
        operation: Operation,
        prompt: &str,
    ) -> Result<String, ChatError> {
        let timeout = self.request_timeout;
        let started = Instant::now();

        let result = retry_with_backoff(&self.retry, operation.as_str(), || async move {
            match tokio::time::timeout(timeout, provider.generate(prompt)).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::timed_out(timeout)),
            }
        })
        .await;

        metrics::record_provider_latency(
            provider.name(),
            provider.model(),
            started.elapsed().as_secs_f64(),
        );

        match result {
            Ok(generation) => {
                metrics::record_tokens(
                    provider.model(),
                    generation.input_tokens,
                    generation.output_tokens,
                );
                metrics::record_genai_request(operation.as_str(), "success");
                info!(
                    operation = operation.as_str(),
                    model = provider.model(),
                    finish_reason = generation.finish_reason.as_str(),
                    output_len = generation.text.len(),
                    "Generation completed"
                );
                Ok(generation.text)
            }
            Err(err) => {
                metrics::record_provider_error(provider.name(), err.kind());
                warn!(
                    operation = operation.as_str(),
                    model = provider.model(),
                    error = %err,
                    "Generation failed"
                );

                let chat_err = match err {
                    ProviderError::Timeout(secs) => ChatError::UpstreamTimeout(secs),
                    other => ChatError::UpstreamFailure(format!(
                        "{}: {}",
                        operation.failure_prefix(),
                        other
                    )),
                };
                Err(self.reject(operation, chat_err))
            }
        }
    }
}

/// First [`EXCERPT_CHARS`] characters of `text`, with `...` appended when cut.
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::services::providers::mock::MockTextProvider;

    fn fast_retry(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
            backoff_multiplier: 2.0,
            add_jitter: false,
        }
    }

    fn assistant_with(provider: Arc<MockTextProvider>) -> Assistant {
        Assistant::new(
            SessionStore::new(),
            Some(provider),
            Duration::from_secs(5),
            fast_retry(2),
        )
    }

    #[tokio::test]
    async fn test_chat_records_both_turns() {
        let assistant = assistant_with(Arc::new(MockTextProvider::new()));

        let reply = assistant.chat(SessionId::generate(), "  What is an NDA?  ", false).await.unwrap();

        let history = assistant.store().get_history(&reply.session_id);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].content, "What is an NDA?");
        assert_eq!(history[0].is_document, Some(false));
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].content, reply.message);
    }

    #[tokio::test]
    async fn test_prompt_uses_history_before_current_message() {
        let provider = Arc::new(MockTextProvider::new());
        let assistant = assistant_with(provider.clone());

        let first = assistant
            .chat(SessionId::generate(), "What is an NDA?", false)
            .await
            .unwrap();
        assistant
            .chat(first.session_id.clone(), "Can I sign one without a lawyer?", false)
            .await
            .unwrap();

        let prompts = provider.prompts();
        assert!(!prompts[0].contains("Previous conversation context:"));
        assert!(prompts[1].contains("Previous conversation context:\nUser: What is an NDA?\n"));
        assert!(!prompts[1].contains("User: Can I sign one without a lawyer?"));
    }

    #[tokio::test]
    async fn test_prompt_history_is_windowed() {
        let provider = Arc::new(MockTextProvider::new());
        let assistant = assistant_with(provider.clone());

        let session_id = SessionId::generate();
        for i in 0..5 {
            assistant
                .chat(session_id.clone(), &format!("question {}", i), false)
                .await
                .unwrap();
        }

        // Four exchanges (eight turns) precede the last prompt; only six make it in.
        let last = provider.prompts().pop().unwrap();
        assert!(!last.contains("User: question 0\n"));
        for kept in ["User: question 1\n", "User: question 2\n", "User: question 3\n"] {
            assert!(last.contains(kept), "{:?} missing", kept);
        }
        assert_eq!(last.matches("Assistant: Mock response").count(), 3);
    }

    #[tokio::test]
    async fn test_blank_message_never_touches_store() {
        let provider = Arc::new(MockTextProvider::new());
        let assistant = assistant_with(provider.clone());

        for blank in ["", "   ", "\n\t"] {
            let err = assistant.chat(SessionId::generate(), blank, false).await.unwrap_err();
            assert_eq!(err, ChatError::Validation("Message cannot be empty"));
        }

        assert!(assistant.store().is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_provider_is_reported_before_validation() {
        let assistant = Assistant::new(
            SessionStore::new(),
            None,
            Duration::from_secs(5),
            fast_retry(0),
        );

        let err = assistant.chat(SessionId::generate(), "", false).await.unwrap_err();
        assert_eq!(err, ChatError::UpstreamUnavailable);
        assert!(assistant.store().is_empty());
    }

    #[tokio::test]
    async fn test_failed_call_keeps_user_turn() {
        let provider = Arc::new(
            MockTextProvider::new().fail_next(ProviderError::ApiError("quota exceeded".into())),
        );
        let assistant = assistant_with(provider.clone());
        let session_id = SessionId::generate();

        let err = assistant
            .chat(session_id.clone(), "Is this clause enforceable?", true)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ChatError::UpstreamFailure(
                "Error processing request: API error: quota exceeded".to_string()
            )
        );
        let history = assistant.store().get_history(&session_id);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].is_document, Some(true));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let provider = Arc::new(MockTextProvider::new().fail_next(ProviderError::RateLimited));
        let assistant = assistant_with(provider.clone());

        let reply = assistant.chat(SessionId::generate(), "hello", false).await.unwrap();

        assert!(reply.message.starts_with("Mock response"));
        assert_eq!(provider.call_count(), 2);
        assert_eq!(assistant.store().get_history(&reply.session_id).len(), 2);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let provider = Arc::new(MockTextProvider::new().with_delay(Duration::from_millis(200)));
        let assistant = Assistant::new(
            SessionStore::new(),
            Some(provider.clone()),
            Duration::from_millis(20),
            fast_retry(1),
        );

        let err = assistant.chat(SessionId::generate(), "hello", false).await.unwrap_err();

        assert_eq!(err, ChatError::UpstreamTimeout(1));
        assert_eq!(err.to_string(), "AI provider did not respond within 1s");
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_citation_requires_text() {
        let provider = Arc::new(MockTextProvider::new());
        let assistant = assistant_with(provider.clone());

        let err = assistant.format_citation("  ").await.unwrap_err();
        assert_eq!(err, ChatError::Validation("Citation text required"));

        let formatted = assistant.format_citation(" 15 usc 45 ").await.unwrap();
        assert!(formatted.starts_with("Mock response"));
        assert_eq!(provider.call_count(), 1);
        assert!(provider.prompts()[0].contains("\"15 usc 45\""));
        assert!(assistant.store().is_empty());
    }

    #[tokio::test]
    async fn test_category_failure_uses_category_prefix() {
        let provider = Arc::new(
            MockTextProvider::new().fail_next(ProviderError::ContentFiltered),
        );
        let assistant = assistant_with(provider);

        let err = assistant.analyze_category("Landlord kept my deposit").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error analyzing category: Content filtered"
        );
    }

    #[tokio::test]
    async fn test_category_analysis_truncates_echoed_text() {
        let assistant = assistant_with(Arc::new(MockTextProvider::new()));
        let text = "a".repeat(150);

        let analysis = assistant.analyze_category(&text).await.unwrap();

        assert_eq!(analysis.excerpt, format!("{}...", "a".repeat(100)));
    }

    #[test]
    fn test_excerpt_keeps_short_text() {
        assert_eq!(excerpt("short"), "short");
        assert_eq!(excerpt(&"b".repeat(100)), "b".repeat(100));
        assert_eq!(excerpt(&"é".repeat(101)), format!("{}...", "é".repeat(100)));
    }

    #[test]
    fn test_error_status_mapping() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let cases = [
            (ChatError::Validation("Text required"), StatusCode::BAD_REQUEST),
            (ChatError::UpstreamUnavailable, StatusCode::INTERNAL_SERVER_ERROR),
            (
                ChatError::UpstreamFailure("Error processing request: boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ChatError::UpstreamTimeout(60), StatusCode::GATEWAY_TIMEOUT),
        ];

        for (err, status) in cases {
            let res = AppError::from(err).into_response();
            assert_eq!(res.status(), status);
        }
    }
}
