//! Cache-wrapped pipeline
//!
//! Checks the pattern cache before running the waltz and stores results
//! after — but only results that actually completed. Refusal outcomes
//! (`NO_PATTERNS`, `ALREADY_COMPLETE`, `MAX_RECURSION`) are never cached.

use crate::{CacheStats, PatternCache, ThreeFingerWaltz, DEFAULT_CACHE_SIZE};
use serde::{Deserialize, Serialize};
use waltz_types::{DanceOutcome, PatternRecord};

/// A dance outcome annotated with where it came from.
#[derive(Clone, Debug)]
pub struct CachedOutcome {
    pub outcome: DanceOutcome,
    /// True when the result was served from the cache without running
    /// any pipeline stage.
    pub from_cache: bool,
}

/// Pipeline wrapper that caches completed results by pattern digest.
#[derive(Debug)]
pub struct CachedWaltz {
    waltz: ThreeFingerWaltz,
    cache: PatternCache,
    cache_hits: u64,
    cache_misses: u64,
}

impl Default for CachedWaltz {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

impl CachedWaltz {
    /// Create a cached pipeline with the given cache capacity.
    pub fn new(cache_size: usize) -> Self {
        Self::with_waltz(ThreeFingerWaltz::new(), cache_size)
    }

    /// Wrap an existing pipeline instance.
    pub fn with_waltz(waltz: ThreeFingerWaltz, cache_size: usize) -> Self {
        Self {
            waltz,
            cache: PatternCache::new(cache_size),
            cache_hits: 0,
            cache_misses: 0,
        }
    }

    /// Execute the waltz, serving from the cache when possible.
    ///
    /// On a hit the pipeline is untouched; on a miss the waltz runs and a
    /// completed result is stored for the next identical pattern list.
    pub fn dance(&mut self, patterns: &[PatternRecord]) -> CachedOutcome {
        if let Some(result) = self.cache.get(patterns) {
            self.cache_hits += 1;
            return CachedOutcome {
                outcome: DanceOutcome::Complete(result),
                from_cache: true,
            };
        }

        self.cache_misses += 1;
        let outcome = self.waltz.dance(patterns);
        if let DanceOutcome::Complete(result) = &outcome {
            self.cache.put(patterns, result);
        }

        CachedOutcome {
            outcome,
            from_cache: false,
        }
    }

    /// Cache-level statistics merged with wrapper-level counters.
    pub fn cache_stats(&self) -> WrappedCacheStats {
        let total_requests = self.cache_hits + self.cache_misses;
        let waltz_hit_rate = if total_requests == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total_requests as f64
        };
        WrappedCacheStats {
            cache: self.cache.stats(),
            waltz_cache_hits: self.cache_hits,
            waltz_cache_misses: self.cache_misses,
            waltz_hit_rate,
            total_waltz_requests: total_requests,
        }
    }

    /// Read access to the wrapped pipeline.
    pub fn waltz(&self) -> &ThreeFingerWaltz {
        &self.waltz
    }

    /// Mutable access to the wrapped pipeline, for reversal and direct
    /// state inspection. Bypassing the cache is the caller's choice.
    pub fn waltz_mut(&mut self) -> &mut ThreeFingerWaltz {
        &mut self.waltz
    }

    /// Reset pipeline state, clear the cache, and zero the counters.
    pub fn reset(&mut self) {
        self.waltz.reset();
        self.cache.clear();
        self.cache_hits = 0;
        self.cache_misses = 0;
    }
}

/// Wrapper counters over [`CacheStats`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WrappedCacheStats {
    pub cache: CacheStats,
    pub waltz_cache_hits: u64,
    pub waltz_cache_misses: u64,
    pub waltz_hit_rate: f64,
    pub total_waltz_requests: u64,
}
