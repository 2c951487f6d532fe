pub mod expander;
pub mod word_vectors;

pub use expander::{SemanticExpander, dedup_keep_order};
pub use word_vectors::{WordVectorError, WordVectorModel, WordVectors};
