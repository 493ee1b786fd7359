//! Telemetry: structured logging and running metrics
//!
//! [`InstrumentedWaltz`] wraps the cached pipeline with wall-clock
//! timing, `tracing` events for start / cache hit / cache miss /
//! completion / error, and a [`WaltzMetrics`] aggregate readable at any
//! time via a non-destructive summary.
//!
//! No subscriber is installed here — callers own subscriber setup.

use crate::{CachedOutcome, CachedWaltz, WrappedCacheStats, DEFAULT_CACHE_SIZE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error, info};
use waltz_types::{DanceOutcome, PatternRecord, WaltzPhase};

/// Running counters owned by the instrumentation wrapper.
#[derive(Clone, Debug)]
pub struct WaltzMetrics {
    total_executions: u64,
    total_duration: f64,
    total_patterns: u64,
    error_count: u64,
    phase_durations: BTreeMap<WaltzPhase, Vec<f64>>,
    started_at: DateTime<Utc>,
}

impl Default for WaltzMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl WaltzMetrics {
    pub fn new() -> Self {
        Self {
            total_executions: 0,
            total_duration: 0.0,
            total_patterns: 0,
            error_count: 0,
            phase_durations: WaltzPhase::ALL.iter().map(|p| (*p, Vec::new())).collect(),
            started_at: Utc::now(),
        }
    }

    /// Record one execution: total duration, how many patterns were
    /// supplied, and per-phase durations where known.
    pub fn record_execution(
        &mut self,
        duration_secs: f64,
        patterns_count: usize,
        phases: &[(WaltzPhase, f64)],
    ) {
        self.total_executions += 1;
        self.total_duration += duration_secs;
        self.total_patterns += patterns_count as u64;
        for (phase, duration) in phases {
            self.phase_durations.entry(*phase).or_default().push(*duration);
        }
    }

    /// Count one failed execution.
    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    /// Non-destructive aggregate summary.
    pub fn summary(&self) -> MetricsSummary {
        let avg_duration_secs = if self.total_executions > 0 {
            self.total_duration / self.total_executions as f64
        } else {
            0.0
        };
        let avg_patterns_per_execution = if self.total_executions > 0 {
            self.total_patterns as f64 / self.total_executions as f64
        } else {
            0.0
        };
        let attempts = self.total_executions + self.error_count;
        let error_rate = if attempts > 0 {
            self.error_count as f64 / attempts as f64
        } else {
            0.0
        };

        let phase_avg_durations = self
            .phase_durations
            .iter()
            .map(|(phase, samples)| {
                let avg = if samples.is_empty() {
                    0.0
                } else {
                    samples.iter().sum::<f64>() / samples.len() as f64
                };
                (phase.tag().to_string(), avg)
            })
            .collect();

        let uptime_secs = (Utc::now() - self.started_at).num_milliseconds() as f64 / 1000.0;
        let executions_per_minute = if uptime_secs > 0.0 {
            self.total_executions as f64 / uptime_secs * 60.0
        } else {
            0.0
        };

        MetricsSummary {
            total_executions: self.total_executions,
            avg_duration_secs,
            avg_patterns_per_execution,
            error_count: self.error_count,
            error_rate,
            phase_avg_durations,
            total_duration_secs: self.total_duration,
            uptime_secs,
            executions_per_minute,
        }
    }

    /// Zero every counter and restart the uptime clock.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Aggregated metrics snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_executions: u64,
    pub avg_duration_secs: f64,
    pub avg_patterns_per_execution: f64,
    pub error_count: u64,
    pub error_rate: f64,
    pub phase_avg_durations: BTreeMap<String, f64>,
    pub total_duration_secs: f64,
    pub uptime_secs: f64,
    pub executions_per_minute: f64,
}

/// Timing metadata attached to every instrumented outcome.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Telemetry {
    pub duration_secs: f64,
    pub cached: bool,
    pub timestamp: DateTime<Utc>,
}

/// A cached outcome annotated with telemetry.
#[derive(Clone, Debug)]
pub struct InstrumentedOutcome {
    pub outcome: DanceOutcome,
    pub from_cache: bool,
    pub telemetry: Telemetry,
}

/// Fully instrumented pipeline: caching + logging + metrics.
#[derive(Debug)]
pub struct InstrumentedWaltz {
    inner: CachedWaltz,
    metrics: WaltzMetrics,
}

impl Default for InstrumentedWaltz {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

impl InstrumentedWaltz {
    pub fn new(cache_size: usize) -> Self {
        Self {
            inner: CachedWaltz::new(cache_size),
            metrics: WaltzMetrics::new(),
        }
    }

    /// Execute the cached waltz with timing, logging, and metrics.
    pub fn dance(&mut self, patterns: &[PatternRecord]) -> InstrumentedOutcome {
        let started = Utc::now();
        info!(patterns = patterns.len(), "waltz start");

        let CachedOutcome { outcome, from_cache } = self.inner.dance(patterns);
        let duration_secs = (Utc::now() - started).num_microseconds().unwrap_or(0) as f64 / 1e6;

        if from_cache {
            debug!(patterns = patterns.len(), "cache hit");
        } else {
            debug!(patterns = patterns.len(), "cache miss");
        }

        let phase_durations = self.phase_durations();
        self.metrics
            .record_execution(duration_secs, patterns.len(), &phase_durations);

        info!(
            status = %outcome.status(),
            duration_secs,
            from_cache,
            "waltz complete"
        );

        InstrumentedOutcome {
            outcome,
            from_cache,
            telemetry: Telemetry {
                duration_secs,
                cached: from_cache,
                timestamp: Utc::now(),
            },
        }
    }

    /// Log and count a failure that occurred in caller-side work wrapped
    /// around the pipeline. The error itself stays with the caller.
    pub fn record_error(&mut self, err: &dyn std::fmt::Display) {
        error!(error = %err, "waltz error");
        self.metrics.record_error();
    }

    /// Per-phase durations derived from consecutive step timestamps.
    ///
    /// The first phase is measured from pipeline construction time.
    fn phase_durations(&self) -> Vec<(WaltzPhase, f64)> {
        let steps = self.inner.waltz().steps();
        let mut durations = Vec::with_capacity(steps.len());
        let mut previous = self.inner.waltz().initialized_at();
        for step in steps {
            let elapsed = (step.timestamp - previous).num_microseconds().unwrap_or(0) as f64 / 1e6;
            durations.push((step.phase, elapsed));
            previous = step.timestamp;
        }
        durations
    }

    /// Metrics summary merged with cache statistics.
    pub fn metrics_summary(&self) -> InstrumentedSummary {
        InstrumentedSummary {
            metrics: self.metrics.summary(),
            cache: self.inner.cache_stats(),
        }
    }

    /// Read access to the wrapped cached pipeline.
    pub fn cached(&self) -> &CachedWaltz {
        &self.inner
    }

    /// Read access to the bare pipeline, for status and export.
    pub fn waltz(&self) -> &crate::ThreeFingerWaltz {
        self.inner.waltz()
    }

    /// Mutable access to the wrapped cached pipeline.
    pub fn cached_mut(&mut self) -> &mut CachedWaltz {
        &mut self.inner
    }

    /// Reset pipeline, cache, and metrics.
    pub fn reset(&mut self) {
        self.inner.reset();
        self.metrics.reset();
    }
}

/// Combined metrics and cache view.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstrumentedSummary {
    pub metrics: MetricsSummary,
    pub cache: WrappedCacheStats,
}
