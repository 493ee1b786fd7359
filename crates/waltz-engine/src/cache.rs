//! Pattern cache: ordered LRU over canonical pattern digests
//!
//! The cache key is a SHA-256 digest of the canonical JSON encoding of
//! the full pattern slice. Pattern records keep their fields sorted, so
//! two equal pattern lists always hash identically regardless of how
//! their fields were inserted.
//!
//! Eviction is true least-recently-used via an ordered map (`lru`),
//! with well-defined tie-breaking — a deliberate upgrade over raw
//! access counters, which break ties arbitrarily under bursty access.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use waltz_types::{PatternRecord, WaltzResult};

/// Default capacity of a pattern cache.
pub const DEFAULT_CACHE_SIZE: usize = 128;

/// Bounded result cache with LRU eviction and hit/miss counters.
pub struct PatternCache {
    entries: LruCache<String, WaltzResult>,
    hits: u64,
    misses: u64,
}

impl PatternCache {
    /// Create a cache holding at most `max_size` results.
    ///
    /// A zero capacity is clamped to one entry.
    pub fn new(max_size: usize) -> Self {
        let capacity = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// SHA-256 digest of the canonical JSON encoding of a pattern slice.
    ///
    /// Order-sensitive across the slice; field order within each record
    /// is canonicalized by `PatternRecord` itself.
    pub fn digest(patterns: &[PatternRecord]) -> String {
        let serialized = serde_json::to_vec(patterns).unwrap_or_default();
        hex::encode(Sha256::digest(&serialized))
    }

    /// Look up the cached result for a pattern list.
    ///
    /// A hit promotes the entry to most-recently-used and returns a deep
    /// copy; the only other side effects are the hit/miss counters.
    pub fn get(&mut self, patterns: &[PatternRecord]) -> Option<WaltzResult> {
        let key = Self::digest(patterns);
        match self.entries.get(&key) {
            Some(result) => {
                self.hits += 1;
                Some(result.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a deep copy of a result, evicting the least-recently-used
    /// entry if at capacity and the key is new.
    pub fn put(&mut self, patterns: &[PatternRecord], result: &WaltzResult) {
        self.entries.put(Self::digest(patterns), result.clone());
    }

    /// Current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let total_accesses = self.hits + self.misses;
        let hit_rate = if total_accesses == 0 {
            0.0
        } else {
            self.hits as f64 / total_accesses as f64
        };
        CacheStats {
            size: self.entries.len(),
            max_size: self.entries.cap().get(),
            total_accesses,
            hit_rate,
            total_hits: self.hits,
            total_misses: self.misses,
        }
    }

    /// Empty the cache and reset counters to zero.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl std::fmt::Debug for PatternCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternCache")
            .field("size", &self.entries.len())
            .field("max_size", &self.entries.cap().get())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

/// Snapshot of cache counters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    pub total_accesses: u64,
    pub hit_rate: f64,
    pub total_hits: u64,
    pub total_misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use waltz_types::PatternRecord;

    fn result_named(name: &str) -> WaltzResult {
        WaltzResult {
            pattern: PatternRecord::named(name),
            steps: Vec::new(),
            phase_count: 4,
            recursion_depth: 1,
            energy_conservation: 0.90,
        }
    }

    fn patterns(name: &str) -> Vec<PatternRecord> {
        vec![PatternRecord::named(name)]
    }

    #[test]
    fn test_roundtrip() {
        let mut cache = PatternCache::new(4);
        let key = patterns("a");

        assert!(cache.get(&key).is_none());
        cache.put(&key, &result_named("a"));
        let hit = cache.get(&key).expect("cached");
        assert_eq!(hit.pattern.name(), "a");
    }

    #[test]
    fn test_digest_stable_under_field_order() {
        let a = vec![PatternRecord::new()
            .with_field("x", 1)
            .with_field("y", 2)];
        let b = vec![PatternRecord::new()
            .with_field("y", 2)
            .with_field("x", 1)];
        assert_eq!(PatternCache::digest(&a), PatternCache::digest(&b));
    }

    #[test]
    fn test_digest_order_sensitive_across_slice() {
        let ab = vec![PatternRecord::named("a"), PatternRecord::named("b")];
        let ba = vec![PatternRecord::named("b"), PatternRecord::named("a")];
        assert_ne!(PatternCache::digest(&ab), PatternCache::digest(&ba));
    }

    #[test]
    fn test_lru_eviction_keeps_recently_accessed() {
        // put A, put B, get A (A becomes most recent), put C -> B evicted.
        let mut cache = PatternCache::new(2);
        cache.put(&patterns("a"), &result_named("a"));
        cache.put(&patterns("b"), &result_named("b"));
        assert!(cache.get(&patterns("a")).is_some());

        cache.put(&patterns("c"), &result_named("c"));

        assert!(cache.get(&patterns("a")).is_some());
        assert!(cache.get(&patterns("c")).is_some());
        assert!(cache.get(&patterns("b")).is_none());
    }

    #[test]
    fn test_stats() {
        let mut cache = PatternCache::new(2);
        assert_eq!(cache.stats().hit_rate, 0.0);

        cache.put(&patterns("a"), &result_named("a"));
        cache.get(&patterns("a"));
        cache.get(&patterns("missing"));

        let stats = cache.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.max_size, 2);
        assert_eq!(stats.total_hits, 1);
        assert_eq!(stats.total_misses, 1);
        assert_eq!(stats.total_accesses, 2);
        assert_eq!(stats.hit_rate, 0.5);
    }

    #[test]
    fn test_clear() {
        let mut cache = PatternCache::new(2);
        cache.put(&patterns("a"), &result_named("a"));
        cache.get(&patterns("a"));
        cache.clear();

        let stats = cache.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.total_accesses, 0);
        assert!(cache.get(&patterns("a")).is_none());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut cache = PatternCache::new(0);
        cache.put(&patterns("a"), &result_named("a"));
        assert_eq!(cache.stats().max_size, 1);
        assert!(cache.get(&patterns("a")).is_some());
    }
}
