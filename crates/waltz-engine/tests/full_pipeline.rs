//! End-to-end coverage of the dance → cache → telemetry path.

use waltz_engine::{InstrumentedWaltz, PatternCache, ThreeFingerWaltz};
use waltz_types::{PatternRecord, ReversalStatus, WaltzStatus};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn pillar_patterns() -> Vec<PatternRecord> {
    vec![
        PatternRecord::named("phoenix_pattern").with_field("pillar", "Phoenix"),
        PatternRecord::named("hydro_pattern").with_field("pillar", "Hydrogenesi"),
        PatternRecord::named("third_pattern").with_field("pillar", "The Third"),
    ]
}

#[test]
fn full_run_then_reverse_then_rerun() {
    init_tracing();
    let mut waltz = ThreeFingerWaltz::new();

    let outcome = waltz.dance(&pillar_patterns());
    let result = outcome.result().expect("waltz completes");
    assert_eq!(result.phase_count, 4);
    assert_eq!(result.energy_conservation, 0.90);
    assert_eq!(result.recursion_depth, 1);

    // Second invocation refuses without touching the step log.
    assert_eq!(
        waltz.dance(&pillar_patterns()).status(),
        WaltzStatus::AlreadyComplete
    );
    assert_eq!(waltz.steps().len(), 4);

    // Reversal rewinds, and the instance dances again.
    let reversal = waltz.reverse_waltz();
    assert_eq!(reversal.status(), ReversalStatus::Reversed);
    assert!(waltz
        .dance(&pillar_patterns())
        .status()
        .eq(&WaltzStatus::WaltzComplete));
}

#[test]
fn recursion_depth_accounting_across_reversals() {
    let mut waltz = ThreeFingerWaltz::with_max_recursion(2);

    // Each dance+reverse nets zero depth; dance alone nets one.
    waltz.dance(&pillar_patterns());
    waltz.reverse_waltz();
    waltz.dance(&pillar_patterns());
    waltz.reverse_waltz();
    waltz.dance(&pillar_patterns());
    waltz.reverse_waltz();
    assert_eq!(waltz.recursion_depth(), 0);

    waltz.dance(&pillar_patterns());
    waltz.reverse_waltz();
    waltz.dance(&pillar_patterns());
    assert_eq!(waltz.recursion_depth(), 1);
}

#[test]
fn cache_round_trip_matches_live_result() {
    let mut cache = PatternCache::new(4);
    let patterns = pillar_patterns();

    let mut waltz = ThreeFingerWaltz::new();
    let result = waltz
        .dance(&patterns)
        .into_result()
        .expect("waltz completes");

    assert!(cache.get(&patterns).is_none());
    cache.put(&patterns, &result);
    let cached = cache.get(&patterns).expect("stored");

    assert_eq!(cached.phase_count, result.phase_count);
    assert_eq!(cached.energy_conservation, result.energy_conservation);
    assert_eq!(cached.pattern.get("triad"), result.pattern.get("triad"));
}

#[test]
fn instrumented_pipeline_reports_consistent_views() {
    let mut waltz = InstrumentedWaltz::new(4);

    let live = waltz.dance(&pillar_patterns());
    assert!(!live.from_cache);
    let replay = waltz.dance(&pillar_patterns());
    assert!(replay.from_cache);

    let summary = waltz.metrics_summary();
    assert_eq!(summary.metrics.total_executions, 2);
    assert_eq!(summary.metrics.avg_patterns_per_execution, 3.0);
    assert_eq!(summary.cache.waltz_cache_hits, 1);
    assert_eq!(summary.cache.waltz_cache_misses, 1);
    assert_eq!(summary.cache.cache.size, 1);

    let status = waltz.waltz().status();
    assert!(status.completed);
    assert_eq!(status.steps_taken, 4);
    assert_eq!(status.history_count, 1);
}
