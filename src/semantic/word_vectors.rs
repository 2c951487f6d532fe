use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::core::error::DegradedReason;

#[derive(Error, Debug)]
pub enum WordVectorError {
    #[error("word vector file not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("word vector file has no entries")]
    Empty,
}

impl From<WordVectorError> for DegradedReason {
    fn from(err: WordVectorError) -> Self {
        match err {
            WordVectorError::NotFound(_) => DegradedReason::ModelAbsent,
            other => DegradedReason::LoadFailed(other.to_string()),
        }
    }
}


/// Nearest-neighbour lookup over a fixed vocabulary.
pub trait WordVectorModel: Send + Sync {
    fn contains(&self, word: &str) -> bool;

    fn most_similar(&self, word: &str, topn: usize) -> Result<Vec<(String, f32)>, DegradedReason>;

    fn vocab_size(&self) -> usize;
}


/// In-memory word2vec vectors, unit-normalised so similarity is a dot product.
pub struct WordVectors {
    words: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Vec<Vec<f32>>,
    dims: usize,
}

impl WordVectors {

    /// Loads the word2vec text format. The `<count> <dims>` header line is optional.
    pub fn load(path: &Path) -> Result<Self, WordVectorError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => WordVectorError::NotFound(path.display().to_string()),
            _ => WordVectorError::Io(e),
        })?;

        let model = Self::parse(&content)?;
        info!(
            "Loaded {} word vectors (dims={}) from {}",
            model.words.len(),
            model.dims,
            path.display()
        );
        Ok(model)
    }

    pub fn parse(content: &str) -> Result<Self, WordVectorError> {
        let mut entries = Vec::new();
        let mut dims = None;

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let rest: Vec<&str> = fields.collect();

            if idx == 0 && is_header(word, &rest) {
                continue;
            }

            let vector = rest
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|e| WordVectorError::Parse {
                    line: line_no,
                    message: e.to_string(),
                })?;

            match dims {
                None if vector.is_empty() => {
                    return Err(WordVectorError::Parse {
                        line: line_no,
                        message: format!("'{word}' has no components"),
                    });
                }
                None => dims = Some(vector.len()),
                Some(d) if d != vector.len() => {
                    return Err(WordVectorError::Parse {
                        line: line_no,
                        message: format!("expected {} components, found {}", d, vector.len()),
                    });
                }
                Some(_) => {}
            }

            entries.push((word.to_string(), vector));
        }

        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<(String, Vec<f32>)>) -> Result<Self, WordVectorError> {
        let dims = entries.first().map(|(_, v)| v.len()).ok_or(WordVectorError::Empty)?;

        let mut words = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());
        let mut vectors = Vec::with_capacity(entries.len());

        for (word, vector) in entries {
            if index.contains_key(&word) {
                continue;
            }
            index.insert(word.clone(), words.len());
            words.push(word);
            vectors.push(unit(vector));
        }

        Ok(Self {
            words,
            index,
            vectors,
            dims,
        })
    }

    pub fn dims(&self) -> usize {
        self.dims
    }
}

fn is_header(first: &str, rest: &[&str]) -> bool {
    rest.len() == 1 && first.parse::<usize>().is_ok() && rest[0].parse::<usize>().is_ok()
}

fn unit(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|x| *x /= norm);
    }
    vector
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl WordVectorModel for WordVectors {
    fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn most_similar(&self, word: &str, topn: usize) -> Result<Vec<(String, f32)>, DegradedReason> {
        let &target = self
            .index
            .get(word)
            .ok_or_else(|| DegradedReason::OutOfVocabulary(word.to_string()))?;
        let query = &self.vectors[target];

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != target)
            .map(|(i, v)| (i, dot(query, v)))
            .filter(|(_, score)| score.is_finite())
            .collect();

        // Stable sort keeps vocabulary order among equal scores.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored
            .into_iter()
            .take(topn)
            .map(|(i, score)| (self.words[i].clone(), score))
            .collect())
    }

    fn vocab_size(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "5 3\n\
        高档 1.0 0.0 0.0\n\
        豪华 0.9 0.1 0.0\n\
        奢华 0.8 0.2 0.0\n\
        经济型 0.0 1.0 0.0\n\
        实惠 0.1 0.9 0.0\n";

    #[test]
    fn test_parse_with_header() {
        let model = WordVectors::parse(SAMPLE).unwrap();
        assert_eq!(model.vocab_size(), 5);
        assert_eq!(model.dims(), 3);
        assert!(model.contains("奢华"));
    }

    #[test]
    fn test_parse_without_header() {
        let model = WordVectors::parse("高档 1 0\n豪华 0 1\n").unwrap();
        assert_eq!(model.vocab_size(), 2);
    }

    #[test]
    fn test_most_similar_excludes_self_and_orders() {
        let model = WordVectors::parse(SAMPLE).unwrap();
        let similar = model.most_similar("高档", 2).unwrap();
        let words: Vec<&str> = similar.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["豪华", "奢华"]);
        assert!(similar[0].1 >= similar[1].1);
    }

    #[test]
    fn test_topn_larger_than_vocab() {
        let model = WordVectors::parse(SAMPLE).unwrap();
        assert_eq!(model.most_similar("实惠", 10).unwrap().len(), 4);
    }

    #[test]
    fn test_out_of_vocabulary() {
        let model = WordVectors::parse(SAMPLE).unwrap();
        assert_eq!(
            model.most_similar("一对一", 3),
            Err(DegradedReason::OutOfVocabulary("一对一".to_string()))
        );
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let err = WordVectors::parse("高档 1 0\n豪华 0 1 2\n").err().unwrap();
        assert!(matches!(err, WordVectorError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_bad_number_rejected() {
        assert!(WordVectors::parse("高档 1 x\n").is_err());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(WordVectors::parse("").err().unwrap(), WordVectorError::Empty));
    }

    #[test]
    fn test_missing_file_is_model_absent() {
        let err = WordVectors::load(Path::new("/no/such/w2v.txt")).err().unwrap();
        assert_eq!(DegradedReason::from(err), DegradedReason::ModelAbsent);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w2v.txt");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(WordVectors::load(&path).unwrap().vocab_size(), 5);
    }
}
