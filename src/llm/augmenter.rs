

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::providers::base::{LlmProvider, LlmProviderError};
use crate::utils::safe_truncate_ellipsis;


#[derive(Error, Debug)]
pub enum AugmentationError {
    #[error("no augmentation service configured")]
    Unavailable,

    #[error("augmentation timed out after {0:?}")]
    Timeout(Duration),

    #[error("augmentation provider failed: {0}")]
    Provider(#[from] LlmProviderError),

    #[error("augmentation returned an empty response")]
    EmptyResponse,
}

impl AugmentationError {
    /// `Unavailable` is the expected state when nothing is configured.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}


/// Optional natural-language helper consulted by intent detection and expansion.
#[async_trait]
pub trait QueryAugmenter: Send + Sync {
    /// Free-text label for the query; callers look for an intent keyword in it.
    async fn classify(&self, query: &str) -> Result<String, AugmentationError>;

    /// Comma-separated related search terms.
    async fn expand(&self, query: &str) -> Result<String, AugmentationError>;

    fn name(&self) -> &str;
}

const CLASSIFY_SYSTEM_PROMPT: &str = "You classify e-commerce search queries. \
Answer with exactly one word: navigational, informational, transactional or product_search.";

const EXPAND_SYSTEM_PROMPT: &str = "You help an online store improve search recall. \
Answer with a comma-separated list of at most five short related search terms and nothing else.";


pub struct LlmAugmenter {
    provider: Arc<dyn LlmProvider>,
}

impl LlmAugmenter {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    async fn ask(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AugmentationError> {
        let response = self.provider.generate(system_prompt, user_prompt).await?;
        let response = response.trim();
        if response.is_empty() {
            return Err(AugmentationError::EmptyResponse);
        }
        debug!(
            "{} answered: {}",
            self.provider.provider_name(),
            safe_truncate_ellipsis(response, 80)
        );
        Ok(response.to_string())
    }
}

#[async_trait]
impl QueryAugmenter for LlmAugmenter {
    async fn classify(&self, query: &str) -> Result<String, AugmentationError> {
        self.ask(CLASSIFY_SYSTEM_PROMPT, &format!("Search query: \"{}\"", query))
            .await
    }

    async fn expand(&self, query: &str) -> Result<String, AugmentationError> {
        self.ask(
            EXPAND_SYSTEM_PROMPT,
            &format!("Related product search terms for: \"{}\"", query),
        )
        .await
    }

    fn name(&self) -> &str {
        self.provider.provider_name()
    }
}
