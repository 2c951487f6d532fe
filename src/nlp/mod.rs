pub mod normalizer;
pub mod segmenter;

pub use normalizer::normalize;
pub use segmenter::{JiebaSegmenter, NUMBER_TAG, Segmenter, Token, merge_numerals};
