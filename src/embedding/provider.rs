use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::encoder::SentenceEncoder;
use crate::core::cache::{CacheStats, VectorCache};
use crate::core::error::DegradedReason;
use crate::query_processor::models::SentenceVector;
use crate::{DEFAULT_ENCODER_TIMEOUT_MS, DEFAULT_SENTENCE_VECTOR_DIMS};


/// Produces the whole-query vector: pooled encoder output when available,
/// otherwise four surface features.
///
/// Each encoder call is bounded by `budget`; a slow or dead encoder costs a
/// request at most that long before the fallback is used.
pub struct SentenceEmbedder {
    encoder: Option<Arc<dyn SentenceEncoder>>,
    cache: Option<VectorCache>,
    dims: usize,
    budget: Duration,
}

impl SentenceEmbedder {
    pub fn new(encoder: Option<Arc<dyn SentenceEncoder>>, cache_size: usize, dims: usize) -> Self {
        Self {
            encoder,
            cache: VectorCache::new(cache_size),
            dims,
            budget: Duration::from_millis(DEFAULT_ENCODER_TIMEOUT_MS),
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    pub fn fallback_only() -> Self {
        Self::new(None, 0, DEFAULT_SENTENCE_VECTOR_DIMS)
    }

    pub fn is_encoder_enabled(&self) -> bool {
        self.encoder.is_some()
    }

    pub fn encoder_model(&self) -> Option<&str> {
        self.encoder.as_ref().map(|e| e.model_name())
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(VectorCache::stats)
    }


    /// Mean-pooled encoder output truncated to `dims`, or why it is unavailable.
    pub async fn encode(&self, query: &str) -> Result<Vec<f32>, DegradedReason> {
        let encoder = self.encoder.as_ref().ok_or(DegradedReason::ModelAbsent)?;

        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(query)) {
            debug!("Sentence vector cache hit");
            return Ok(cached);
        }

        let rows = tokio::time::timeout(self.budget, encoder.encode_tokens(query))
            .await
            .map_err(|_| DegradedReason::inference(format!("no response within {:?}", self.budget)))?
            .map_err(DegradedReason::inference)?;
        let mut pooled = mean_pool(&rows).ok_or(DegradedReason::EmptyOutput)?;
        pooled.truncate(self.dims);

        if let Some(cache) = &self.cache {
            cache.set(query, pooled.clone());
        }
        Ok(pooled)
    }

    /// Never fails; any encoder problem yields the feature vector plus its reason.
    pub async fn embed(
        &self,
        query: &str,
        token_count: usize,
    ) -> (SentenceVector, Option<DegradedReason>) {
        match self.encode(query).await {
            Ok(vector) => (SentenceVector::Encoded(vector), None),
            Err(reason) => (fallback_features(query, token_count), Some(reason)),
        }
    }
}


/// Column-wise mean over token rows. `None` for no rows, ragged rows or zero width.
pub fn mean_pool(rows: &[Vec<f32>]) -> Option<Vec<f32>> {
    let width = rows.first()?.len();
    if width == 0 || rows.iter().any(|r| r.len() != width) {
        return None;
    }

    let mut sum = vec![0.0f32; width];
    for row in rows {
        for (acc, x) in sum.iter_mut().zip(row) {
            *acc += x;
        }
    }
    let n = rows.len() as f32;
    Some(sum.into_iter().map(|x| x / n).collect())
}

/// `[chars, count of 的, count of 区, token count]`
pub fn fallback_features(query: &str, token_count: usize) -> SentenceVector {
    SentenceVector::Features(vec![
        query.chars().count(),
        query.matches('的').count(),
        query.matches('区').count(),
        token_count,
    ])
}
