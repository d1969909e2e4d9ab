use std::sync::Arc;
use std::time::Duration;

use crate::llm::augmenter::{AugmentationError, QueryAugmenter};


/// The optional augmentation capability plus the deadline every call runs under.
///
/// Each call is a single attempt. Dropping the returned future abandons the
/// request in flight.
#[derive(Clone)]
pub struct Augmentation {
    augmenter: Option<Arc<dyn QueryAugmenter>>,
    timeout: Duration,
}

impl Augmentation {
    pub fn new(augmenter: Option<Arc<dyn QueryAugmenter>>, timeout: Duration) -> Self {
        Self { augmenter, timeout }
    }

    pub fn disabled() -> Self {
        Self::new(None, Duration::ZERO)
    }

    pub fn is_configured(&self) -> bool {
        self.augmenter.is_some()
    }

    pub async fn classify(&self, query: &str) -> Result<String, AugmentationError> {
        let augmenter = self.augmenter.as_ref().ok_or(AugmentationError::Unavailable)?;
        tokio::time::timeout(self.timeout, augmenter.classify(query))
            .await
            .map_err(|_| AugmentationError::Timeout(self.timeout))?
    }

    pub async fn expand(&self, query: &str) -> Result<String, AugmentationError> {
        let augmenter = self.augmenter.as_ref().ok_or(AugmentationError::Unavailable)?;
        tokio::time::timeout(self.timeout, augmenter.expand(query))
            .await
            .map_err(|_| AugmentationError::Timeout(self.timeout))?
    }
}

impl std::fmt::Debug for Augmentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Augmentation")
            .field("augmenter", &self.augmenter.as_ref().map(|a| a.name()))
            .field("timeout", &self.timeout)
            .finish()
    }
}
