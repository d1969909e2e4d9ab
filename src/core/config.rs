

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::{Result, ShopQueryError};

pub const ENV_PREFIX: &str = "SHOPQUERY";


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {

    pub max_edit_distance: usize,
    pub min_fuzzy_token_len: usize,
    pub dictionary_path: Option<PathBuf>,


    pub expansion_min_terms: usize,


    pub augmentation_enabled: bool,
    pub augmentation_timeout_ms: u64,


    pub llm_provider: String,
    pub llm_model: String,
    pub llm_api_key: Option<String>,
    pub llm_base_url: Option<String>,
    pub llm_temperature: f64,


    pub llm_fallback_enabled: bool,
    pub llm_fallback_url: String,
    pub llm_fallback_model: String,


    pub cache_size: usize,
    pub cache_ttl_secs: u64,
}

impl QueryConfig {
    /// Defaults, then `path` if given, then `SHOPQUERY_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.augmentation_timeout_ms == 0 {
            return Err(ShopQueryError::Config(
                "augmentation_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm_temperature) {
            return Err(ShopQueryError::Config(format!(
                "llm_temperature must be within 0.0..=2.0, got {}",
                self.llm_temperature
            )));
        }
        if let Some(base_url) = &self.llm_base_url {
            check_url("llm_base_url", base_url)?;
        }
        if self.llm_fallback_enabled {
            check_url("llm_fallback_url", &self.llm_fallback_url)?;
        }
        Ok(())
    }

    pub fn augmentation_timeout(&self) -> Duration {
        Duration::from_millis(self.augmentation_timeout_ms)
    }
}

fn check_url(field: &str, value: &str) -> Result<()> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ShopQueryError::Config(format!("{} is not a valid URL ({}): {}", field, value, e)))
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: 2,
            min_fuzzy_token_len: 4,
            dictionary_path: None,

            expansion_min_terms: 5,

            augmentation_enabled: false,
            augmentation_timeout_ms: 2000,

            llm_provider: "ollama".to_string(),
            llm_model: crate::DEFAULT_LLM_MODEL.to_string(),
            llm_api_key: None,
            llm_base_url: None,
            llm_temperature: 0.2,

            llm_fallback_enabled: false,
            llm_fallback_url: crate::DEFAULT_OLLAMA_URL.to_string(),
            llm_fallback_model: "llama3.2".to_string(),

            cache_size: crate::DEFAULT_CACHE_SIZE,
            cache_ttl_secs: crate::DEFAULT_CACHE_TTL,
        }
    }
}
