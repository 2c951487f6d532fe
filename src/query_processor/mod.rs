
pub mod classifier;
pub mod models;
pub mod patterns;
pub mod price;
pub mod processor;

pub use classifier::KeywordClassifier;
pub use models::{ExtractionResult, PriceCondition, PriceValue, SemanticExpansion, SentenceVector};
pub use patterns::PricePattern;
pub use price::{ResolvedPrice, resolve_price};
pub use processor::{Degradation, Extraction, OptionalFeature, ParserStatus, QueryParser};
