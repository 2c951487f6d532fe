use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;


/// Bounded memo of pooled sentence vectors, keyed by normalized query.
///
/// The only state shared between requests besides the read-only lexicon and
/// model handles. Every access is a single short critical section.
pub struct VectorCache {
    cache: Mutex<LruCache<String, Vec<f32>>>,
    stats: Mutex<CacheStats>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub capacity: usize,
    pub hit_rate: f64,
}

impl VectorCache {

    /// Returns `None` for a zero capacity, which disables caching.
    pub fn new(capacity: usize) -> Option<Self> {
        let capacity = NonZeroUsize::new(capacity)?;
        Some(Self {
            cache: Mutex::new(LruCache::new(capacity)),
            stats: Mutex::new(CacheStats {
                capacity: capacity.get(),
                ..CacheStats::default()
            }),
        })
    }


    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        let hit = self.cache.lock().get(key).cloned();

        let mut stats = self.stats.lock();
        if hit.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        hit
    }


    pub fn set(&self, key: &str, vector: Vec<f32>) {
        let mut cache = self.cache.lock();
        cache.put(key.to_string(), vector);
        self.stats.lock().size = cache.len();
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.lock().clone();
        let total = stats.hits + stats.misses;
        if total > 0 {
            stats.hit_rate = stats.hits as f64 / total as f64;
        }
        stats
    }
}
