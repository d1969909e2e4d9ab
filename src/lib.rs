

pub mod core;
pub mod llm;
pub mod query;
pub mod utils;

pub use utils::{safe_truncate, safe_truncate_ellipsis};


pub use core::config::QueryConfig;
pub use core::error::{Result, ShopQueryError};
pub use llm::augmenter::{AugmentationError, LlmAugmenter, QueryAugmenter};
pub use llm::factory::AugmenterFactory;
pub use query::{
    Entity, EntityType, EntityValue, PriceRange, ProcessedQuery, QueryProcessor, SearchFilters,
    SearchIntent, TermDictionary,
};


pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";


pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";


pub const DEFAULT_CEREBRAS_URL: &str = "https://api.cerebras.ai/v1";


pub const DEFAULT_LLM_MODEL: &str = "llama3.1:8b";


pub const DEFAULT_CACHE_SIZE: usize = 1000;


pub const DEFAULT_CACHE_TTL: u64 = 300;
