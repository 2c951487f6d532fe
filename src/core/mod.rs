

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, VectorCache};
pub use config::ParserConfig;
pub use error::{DegradedReason, Result, YueziError};
