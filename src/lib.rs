pub mod api;
pub mod core;
pub mod embedding;
pub mod lexicon;
pub mod mcp;
pub mod nlp;
pub mod query_processor;
pub mod semantic;
pub mod utils;

pub use utils::{query_fingerprint, safe_truncate, safe_truncate_ellipsis};


pub use core::config::ParserConfig;
pub use core::error::{DegradedReason, Result, YueziError};
pub use lexicon::{Category, LexiconSet};
pub use query_processor::{ExtractionResult, PriceCondition, PriceValue, QueryParser};


pub const DEFAULT_PORT: u16 = 5000;


pub const DEFAULT_ENCODER_MODEL: &str = "bert-base-chinese";


/// Per-request budget for one encoder call before the surface-feature fallback is used.
pub const DEFAULT_ENCODER_TIMEOUT_MS: u64 = 500;


pub const DEFAULT_SENTENCE_VECTOR_DIMS: usize = 10;


pub const DEFAULT_EXPANSION_TOPN: usize = 3;


pub const DEFAULT_CACHE_SIZE: usize = 1000;
