//! Suggestion cache using moka
//!
//! Suggestions are requested on every keystroke and every highlight move, so
//! ranked lists are memoised per `(generation, input, scope)`. Keying on the
//! catalog generation means a list computed against an old command set can
//! never be served after a reload, even if it is inserted late.

use crate::matcher::Scope;
use crate::suggest::Suggestion;
use moka::sync::Cache;
use std::sync::Arc;

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SuggestionKey {
    generation: u64,
    input: String,
    scope: Option<Scope>,
}

/// Bounded cache of ranked suggestion lists
#[derive(Debug, Clone)]
pub struct SuggestionCache {
    inner: Cache<SuggestionKey, Arc<Vec<Suggestion>>>,
}

impl SuggestionCache {
    /// Capacity used when none is configured
    pub const DEFAULT_CAPACITY: u64 = 1024;

    /// Create cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Get cached list or compute and insert it
    pub fn get_or_compute<F>(
        &self,
        generation: u64,
        input: &str,
        scope: Option<&Scope>,
        compute: F,
    ) -> Arc<Vec<Suggestion>>
    where
        F: FnOnce() -> Vec<Suggestion>,
    {
        let key = SuggestionKey {
            generation,
            input: input.to_string(),
            scope: scope.cloned(),
        };

        if let Some(hit) = self.inner.get(&key) {
            tracing::trace!(input, generation, "suggestion cache hit");
            return hit;
        }

        let list = Arc::new(compute());
        self.inner.insert(key, Arc::clone(&list));
        list
    }

    /// Check if a list is cached
    #[inline]
    #[must_use]
    pub fn contains(&self, generation: u64, input: &str, scope: Option<&Scope>) -> bool {
        self.inner.contains_key(&SuggestionKey {
            generation,
            input: input.to_string(),
            scope: scope.cloned(),
        })
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get cache statistics
    ///
    /// Flushes moka's pending maintenance first so the count is current.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
