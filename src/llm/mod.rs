

pub mod augmenter;
pub mod cache;
pub mod factory;
pub mod providers;

pub use augmenter::{AugmentationError, LlmAugmenter, QueryAugmenter};
pub use cache::{CacheStats, CachedAugmenter};
pub use factory::{AugmenterFactory, LlmProviderFactory};
pub use providers::{LlmProvider, LlmProviderError};
