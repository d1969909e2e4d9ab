

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::info;

use super::augmenter::{LlmAugmenter, QueryAugmenter};
use super::cache::CachedAugmenter;
use super::providers::base::LlmProvider;
use super::providers::fallback::LlmProviderWithFallback;
use super::providers::ollama::OllamaProvider;
use super::providers::openai::OpenAiCompatProvider;
use crate::core::config::QueryConfig;
use crate::core::error::{Result, ShopQueryError};
use crate::{DEFAULT_CEREBRAS_URL, DEFAULT_OLLAMA_URL, DEFAULT_OPENAI_URL};


pub struct LlmProviderFactory;

impl LlmProviderFactory {

    pub fn create(
        provider: &str,
        model: &str,
        api_key: Option<&str>,
        base_url: Option<&str>,
        temperature: f64,
        config: &QueryConfig,
    ) -> Result<Arc<dyn LlmProvider>> {
        let timeout = config.augmentation_timeout();
        let provider: Arc<dyn LlmProvider> = match provider {
            "ollama" => Arc::new(
                OllamaProvider::new(base_url.unwrap_or(DEFAULT_OLLAMA_URL), model, temperature, timeout)
                    .map_err(|e| ShopQueryError::Config(e.to_string()))?,
            ),
            "openai" | "cerebras" => {
                let api_key = api_key.ok_or_else(|| {
                    ShopQueryError::Config(format!("provider {} requires llm_api_key", provider))
                })?;
                let default_url = if provider == "openai" {
                    DEFAULT_OPENAI_URL
                } else {
                    DEFAULT_CEREBRAS_URL
                };
                Arc::new(
                    OpenAiCompatProvider::new(
                        provider,
                        base_url.unwrap_or(default_url),
                        api_key,
                        model,
                        temperature,
                        timeout,
                    )
                    .map_err(|e| ShopQueryError::Config(e.to_string()))?,
                )
            }
            other => {
                return Err(ShopQueryError::Config(format!(
                    "Unknown provider: {}. Supported: ollama, openai, cerebras",
                    other
                )));
            }
        };
        Ok(provider)
    }
}


pub struct AugmenterFactory;

impl AugmenterFactory {
    /// `None` when augmentation is switched off; the pipeline then runs rules and static tables only.
    pub fn from_config(config: &QueryConfig) -> Result<Option<Arc<dyn QueryAugmenter>>> {
        if !config.augmentation_enabled {
            info!("Query augmentation disabled");
            return Ok(None);
        }

        let mut provider = LlmProviderFactory::create(
            &config.llm_provider,
            &config.llm_model,
            config.llm_api_key.as_deref(),
            config.llm_base_url.as_deref(),
            config.llm_temperature,
            config,
        )?;

        if config.llm_fallback_enabled {
            let fallback = LlmProviderFactory::create(
                "ollama",
                &config.llm_fallback_model,
                None,
                Some(&config.llm_fallback_url),
                config.llm_temperature,
                config,
            )?;
            provider = Arc::new(LlmProviderWithFallback::new(provider, fallback));
        }

        let augmenter: Arc<dyn QueryAugmenter> = Arc::new(LlmAugmenter::new(provider));
        let augmenter: Arc<dyn QueryAugmenter> = match NonZeroUsize::new(config.cache_size) {
            Some(capacity) => Arc::new(CachedAugmenter::new(augmenter, capacity, config.cache_ttl_secs)),
            None => augmenter,
        };

        info!(
            "Query augmentation enabled via {} ({})",
            augmenter.name(),
            config.llm_model
        );
        Ok(Some(augmenter))
    }
}
