//! Selector memoization keyed by literal selector text
//!
//! Bounded: when the cache is full it is cleared before the next insert.

use crate::error::Result;
use crate::selector::{parse_selector, Selector};
use ahash::AHashMap;
use std::sync::Arc;

#[derive(Debug)]
pub struct SelectorCache {
    entries: AHashMap<String, Arc<Selector>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl SelectorCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: AHashMap::with_capacity(capacity.min(64)),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached selector for `text`, parsing it on first use.
    /// Parse failures are not cached.
    pub fn get_or_parse(&mut self, text: &str) -> Result<Arc<Selector>> {
        if let Some(selector) = self.entries.get(text) {
            self.hits += 1;
            tracing::trace!(selector = text, "Selector cache hit");
            return Ok(Arc::clone(selector));
        }

        let selector = Arc::new(parse_selector(text)?);
        self.misses += 1;

        if self.entries.len() >= self.capacity {
            tracing::debug!(
                evicted = self.entries.len(),
                "Selector cache full, clearing"
            );
            self.entries.clear();
        }

        self.entries.insert(text.to_string(), Arc::clone(&selector));
        Ok(selector)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
