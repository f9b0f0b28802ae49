use crate::types::PairKey;
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

/// Storage behind [`crate::SimilarityOracle`].
///
/// Entries are pure functions of the pair, so an implementation may drop
/// entries at any time without changing results.
pub trait SimilarityCache {
    fn get(&mut self, key: &PairKey) -> Option<f32>;

    fn insert(&mut self, key: PairKey, value: f32);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded map owned by a single hint-generation request.
#[derive(Debug, Default)]
pub struct RequestCache {
    entries: HashMap<PairKey, f32>,
}

impl RequestCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimilarityCache for RequestCache {
    fn get(&mut self, key: &PairKey) -> Option<f32> {
        self.entries.get(key).copied()
    }

    fn insert(&mut self, key: PairKey, value: f32) {
        self.entries.insert(key, value);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Process-wide LRU shared between concurrent requests.
///
/// Cloning yields another handle to the same map. The lock is held for a single
/// get or put, never across a similarity computation.
#[derive(Clone, Debug)]
pub struct SharedSimilarityCache {
    inner: Arc<Mutex<LruCache<PairKey, f32>>>,
}

impl SharedSimilarityCache {
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// `None` when `capacity` is zero (shared caching disabled).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity).map(Self::new)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<PairKey, f32>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SimilarityCache for SharedSimilarityCache {
    fn get(&mut self, key: &PairKey) -> Option<f32> {
        self.lock().get(key).copied()
    }

    fn insert(&mut self, key: PairKey, value: f32) {
        self.lock().put(key, value);
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

/// Stores nothing; every lookup goes to the embedding space.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl SimilarityCache for NoCache {
    fn get(&mut self, _key: &PairKey) -> Option<f32> {
        None
    }

    fn insert(&mut self, _key: PairKey, _value: f32) {}

    fn len(&self) -> usize {
        0
    }
}
