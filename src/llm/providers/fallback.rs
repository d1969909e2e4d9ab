

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::{info, warn};

use super::base::{LlmProvider, LlmProviderError};


/// Tries `primary` first and retries the same prompt once on `fallback` when it errors.
pub struct LlmProviderWithFallback {
    primary: Arc<dyn LlmProvider>,
    fallback: Arc<dyn LlmProvider>,
    fallback_count: AtomicUsize,
    primary_failures: AtomicUsize,
}

impl LlmProviderWithFallback {

    pub fn new(primary: Arc<dyn LlmProvider>, fallback: Arc<dyn LlmProvider>) -> Self {
        info!(
            "LlmProviderWithFallback initialized: primary={}/{}, fallback={}/{}",
            primary.provider_name(),
            primary.model_name(),
            fallback.provider_name(),
            fallback.model_name()
        );

        Self {
            primary,
            fallback,
            fallback_count: AtomicUsize::new(0),
            primary_failures: AtomicUsize::new(0),
        }
    }


    pub fn fallback_count(&self) -> usize {
        self.fallback_count.load(Ordering::SeqCst)
    }


    pub fn primary_failures(&self) -> usize {
        self.primary_failures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for LlmProviderWithFallback {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmProviderError> {
        match self.primary.generate(system_prompt, user_prompt).await {
            Ok(content) => Ok(content),
            Err(e) => {
                let failures = self.primary_failures.fetch_add(1, Ordering::SeqCst) + 1;
                warn!(
                    "Primary LLM provider {} failed ({}x), trying {}: {}",
                    self.primary.provider_name(),
                    failures,
                    self.fallback.provider_name(),
                    e
                );

                let content = self.fallback.generate(system_prompt, user_prompt).await?;
                self.fallback_count.fetch_add(1, Ordering::SeqCst);
                Ok(content)
            }
        }
    }

    fn provider_name(&self) -> &str {
        self.primary.provider_name()
    }

    fn model_name(&self) -> &str {
        self.primary.model_name()
    }
}
