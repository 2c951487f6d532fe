use std::collections::HashSet;
use std::sync::Arc;

use super::word_vectors::WordVectorModel;
use crate::core::error::DegradedReason;
use crate::query_processor::models::SemanticExpansion;


pub struct SemanticExpander {
    model: Option<Arc<dyn WordVectorModel>>,
    topn: usize,
}

impl SemanticExpander {
    pub fn new(model: Option<Arc<dyn WordVectorModel>>, topn: usize) -> Self {
        Self { model, topn }
    }

    pub fn disabled() -> Self {
        Self::new(None, 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&Arc<dyn WordVectorModel>> {
        self.model.as_ref()
    }

    /// Up to `topn` neighbours of `term`, or the reason there are none.
    pub fn expand(&self, term: &str) -> Result<Vec<String>, DegradedReason> {
        let model = self.model.as_ref().ok_or(DegradedReason::ModelAbsent)?;
        if !model.contains(term) {
            return Err(DegradedReason::OutOfVocabulary(term.to_string()));
        }
        Ok(model
            .most_similar(term, self.topn)?
            .into_iter()
            .map(|(word, _)| word)
            .collect())
    }

    /// Expands every brand, tier and mode term. Failed lookups contribute nothing
    /// and are returned alongside the expansion.
    pub fn expand_all(
        &self,
        brands: &[String],
        tiers: &[String],
        modes: &[String],
    ) -> (SemanticExpansion, Vec<DegradedReason>) {
        let mut failures = Vec::new();
        if !self.is_enabled() {
            if !(brands.is_empty() && tiers.is_empty() && modes.is_empty()) {
                failures.push(DegradedReason::ModelAbsent);
            }
            return (SemanticExpansion::default(), failures);
        }

        let mut collect = |terms: &[String]| -> Vec<String> {
            let mut expanded = Vec::new();
            for term in terms {
                match self.expand(term) {
                    Ok(words) => expanded.extend(words),
                    Err(reason) => failures.push(reason),
                }
            }
            dedup_keep_order(expanded)
        };

        let expansion = SemanticExpansion {
            brand: collect(brands),
            tier: collect(tiers),
            mode: collect(modes),
        };
        (expansion, failures)
    }
}


pub fn dedup_keep_order(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(words.len());
    words.into_iter().filter(|w| seen.insert(w.clone())).collect()
}
