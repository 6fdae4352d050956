//! Mock provider implementation for testing.

use super::{FinishReason, Generation, ProviderError, TextProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Mock text provider for testing.
///
/// Answers with a short canned reply unless scripted failures are queued, and
/// records every prompt it receives.
#[derive(Default)]
pub struct MockTextProvider {
    delay: Option<Duration>,
    unhealthy: bool,
    failures: Mutex<VecDeque<ProviderError>>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long before answering every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Report a failed health check.
    pub fn unhealthy(mut self) -> Self {
        self.unhealthy = true;
        self
    }

    /// Fail the next call with `error`. Queued failures are consumed in order.
    pub fn fail_next(self, error: ProviderError) -> Self {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push_back(error);
        }
        self
    }

    /// Every prompt received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.failures.lock().ok().and_then(|mut f| f.pop_front());
        if let Some(error) = scripted {
            return Err(error);
        }

        Ok(Generation {
            text: format!("Mock response ({} prompt chars)", prompt.len()),
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: 10,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.unhealthy {
            return Err(ProviderError::NetworkError("mock provider unreachable".to_string()));
        }
        Ok(())
    }
}
