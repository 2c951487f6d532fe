use std::collections::{HashSet, VecDeque};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use jieba_rs::Jieba;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::lexicon::LexiconSet;

/// jieba's part-of-speech tag for numerals.
pub const NUMBER_TAG: &str = "m";

const UNIT_SUFFIXES: &[&str] = &["万", "元", "万元"];

const RANGE_CONNECTORS: &[&str] = &["-", "~", "至", "到"];


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub word: String,
    pub tag: String,
}

impl Token {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }

    pub fn is_number(&self) -> bool {
        self.tag == NUMBER_TAG
    }

    /// Non-empty and ASCII digits only.
    pub fn is_bare_integer(&self) -> bool {
        !self.word.is_empty() && self.word.bytes().all(|b| b.is_ascii_digit())
    }

    fn ends_with_digit(&self) -> bool {
        self.is_number() && self.word.bytes().last().is_some_and(|b| b.is_ascii_digit())
    }
}


pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<Token>;
}


pub struct JiebaSegmenter {
    jieba: Jieba,
    terms: HashSet<String>,
}

impl JiebaSegmenter {

    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
            terms: HashSet::new(),
        }
    }

    /// Registers every lexicon term so dictionary terms come out as single tokens.
    pub fn with_lexicon(lexicon: &LexiconSet) -> Self {
        let mut segmenter = Self::new();
        for term in lexicon.all_terms() {
            segmenter.jieba.add_word(term, None, Some("nz"));
            segmenter.terms.insert(term.to_string());
        }
        debug!("Registered {} lexicon terms with segmenter", segmenter.terms.len());
        segmenter
    }

    /// Loads a jieba-format user dictionary. A missing or unreadable file is skipped.
    pub fn load_user_dict(&mut self, path: &Path) -> bool {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(_) => {
                debug!("No user dictionary at {}", path.display());
                return false;
            }
        };

        match self.jieba.load_dict(&mut BufReader::new(file)) {
            Ok(()) => {
                info!("Loaded user dictionary {}", path.display());
                true
            }
            Err(e) => {
                warn!("Failed to load user dictionary {}: {}", path.display(), e);
                false
            }
        }
    }
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter for JiebaSegmenter {
    fn segment(&self, text: &str) -> Vec<Token> {
        let tokens = self
            .jieba
            .tag(text, true)
            .into_iter()
            .map(|t| Token::new(t.word, t.tag))
            .collect();
        merge_numerals(tokens, &self.terms)
    }
}


/// Joins adjacent digit tokens, glues a directly following 万/元 unit onto
/// them, and folds `3到5`-style ranges into one token.
///
/// "3万" must reach the classifier as one unit-bearing numeral, otherwise the
/// bare "3" would be taken as a price before the pattern stage sees "3万".
/// The same holds for the lower bound of a range. Tokens listed in `terms`
/// are never split.
pub fn merge_numerals(tokens: Vec<Token>, terms: &HashSet<String>) -> Vec<Token> {
    let mut queue: VecDeque<Token> = tokens.into();
    let mut merged: Vec<Token> = Vec::with_capacity(queue.len());

    while let Some(token) = queue.pop_front() {
        let Some(prev) = merged.last_mut().filter(|p| p.ends_with_digit()) else {
            merged.push(token);
            continue;
        };

        if token.is_bare_integer() {
            prev.word.push_str(&token.word);
            continue;
        }

        if let Some(connector) = prefix_of(&token.word, RANGE_CONNECTORS) {
            let tail = &token.word[connector.len()..];
            let upper = if tail.is_empty() {
                if queue.front().is_some_and(|next| starts_with_digit(&next.word)) {
                    queue.pop_front()
                } else {
                    None
                }
            } else if starts_with_digit(tail) {
                Some(Token::new(tail, token.tag.clone()))
            } else {
                None
            };

            if let Some(upper) = upper {
                let digits = upper.word.bytes().take_while(u8::is_ascii_digit).count();
                prev.word.push_str(connector);
                prev.word.push_str(&upper.word[..digits]);
                let rest = &upper.word[digits..];
                if !rest.is_empty() {
                    queue.push_front(Token::new(rest, upper.tag));
                }
                continue;
            }
        }

        // HMM output can fuse the unit with what follows, e.g. "万的".
        if !terms.contains(&token.word) {
            if let Some(unit) = prefix_of(&token.word, UNIT_SUFFIXES) {
                prev.word.push_str(unit);
                let rest = &token.word[unit.len()..];
                if !rest.is_empty() {
                    merged.push(Token::new(rest, token.tag));
                }
                continue;
            }
        }

        merged.push(token);
    }

    merged
}

fn starts_with_digit(word: &str) -> bool {
    word.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

/// Longest entry of `candidates` that `word` starts with.
fn prefix_of(word: &str, candidates: &[&'static str]) -> Option<&'static str> {
    candidates
        .iter()
        .copied()
        .filter(|c| word.starts_with(c))
        .max_by_key(|c| c.len())
}
