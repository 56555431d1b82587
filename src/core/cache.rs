use crate::constants::DEFAULT_POLICY_CACHE_ENTRIES;
use crate::core::plan::HeaderPlan;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Bounded LRU of header plans keyed by the raw `User-Agent` string.
///
/// Entries are computed outside the lock; two requests racing on the same
/// user agent both store the same plan and the last one wins.
#[derive(Debug)]
pub struct PolicyCache {
    entries: Mutex<LruCache<String, Arc<HeaderPlan>>>,
}

impl PolicyCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    #[inline]
    pub fn get(&self, user_agent: &str) -> Option<Arc<HeaderPlan>> {
        self.entries.lock().get(user_agent).cloned()
    }

    #[inline]
    pub fn insert(&self, user_agent: &str, plan: Arc<HeaderPlan>) {
        self.entries.lock().put(user_agent.to_owned(), plan);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    #[inline]
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for PolicyCache {
    fn default() -> Self {
        Self::new(DEFAULT_POLICY_CACHE_ENTRIES)
    }
}
