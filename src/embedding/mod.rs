pub mod encoder;
pub mod provider;

pub use encoder::{EncoderError, SentenceEncoder, TeiEncoder};
pub use provider::{SentenceEmbedder, fallback_features, mean_pool};
