

pub mod config;
pub mod error;

pub use config::QueryConfig;
pub use error::{Result, ShopQueryError};
