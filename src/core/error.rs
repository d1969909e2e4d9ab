

use thiserror::Error;


#[derive(Error, Debug)]
pub enum ShopQueryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Dictionary error: {0}")]
    Dictionary(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}


pub type Result<T> = std::result::Result<T, ShopQueryError>;
