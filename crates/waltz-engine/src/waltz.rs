//! The waltz state machine: four ordered phases, one step each
//!
//! The pipeline is irreversible by design — once Completion runs, the
//! instance refuses further dances until `reset` (or the best-effort
//! `reverse_waltz`). Invocations are bounded by a recursion-depth
//! counter so a loop driving the same instance cannot run away.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use waltz_types::{DanceOutcome, PatternRecord, ReversalOutcome, WaltzPhase, WaltzResult, WaltzStep};

/// Default bound on dance invocations per instance.
pub const DEFAULT_MAX_RECURSION: u32 = 7;

/// The number of pillar patterns a nominal integration supplies.
const EXPECTED_PATTERNS: usize = 3;

/// The Three-Finger Waltz pipeline.
///
/// Folds the first input pattern through all four phases, appending one
/// [`WaltzStep`] per phase and one [`WaltzResult`] per completed run.
#[derive(Clone, Debug)]
pub struct ThreeFingerWaltz {
    steps: Vec<WaltzStep>,
    step_counter: u32,
    current_phase: WaltzPhase,
    completed: bool,
    energy_conservation: f64,
    recursion_depth: u32,
    max_recursion: u32,
    waltz_history: Vec<WaltzResult>,
    initialized_at: DateTime<Utc>,
}

impl Default for ThreeFingerWaltz {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreeFingerWaltz {
    /// Create a pipeline with the default recursion bound.
    pub fn new() -> Self {
        Self::with_max_recursion(DEFAULT_MAX_RECURSION)
    }

    /// Create a pipeline with an explicit recursion bound.
    pub fn with_max_recursion(max_recursion: u32) -> Self {
        Self {
            steps: Vec::new(),
            step_counter: 0,
            current_phase: WaltzPhase::Initiation,
            completed: false,
            energy_conservation: WaltzPhase::Initiation.energy(),
            recursion_depth: 0,
            max_recursion,
            waltz_history: Vec::new(),
            initialized_at: Utc::now(),
        }
    }

    /// Execute the complete four-phase waltz on the first input pattern.
    ///
    /// Preconditions are checked in order: a completed instance returns
    /// `ALREADY_COMPLETE` without re-running; an instance at its recursion
    /// bound returns `MAX_RECURSION` without mutating the step log; an
    /// empty input returns `NO_PATTERNS` with no state change.
    ///
    /// Patterns beyond the first are accepted but not folded through the
    /// phases; supplying fewer than three logs a non-fatal warning since
    /// the nominal design expects one pattern per pillar.
    pub fn dance(&mut self, patterns: &[PatternRecord]) -> DanceOutcome {
        if self.completed {
            return DanceOutcome::AlreadyComplete {
                steps: self.steps.len(),
            };
        }

        if self.recursion_depth >= self.max_recursion {
            return DanceOutcome::MaxRecursion {
                depth: self.recursion_depth,
            };
        }

        let Some(primary) = patterns.first() else {
            return DanceOutcome::NoPatterns;
        };

        if patterns.len() < EXPECTED_PATTERNS {
            warn!(
                count = patterns.len(),
                expected = EXPECTED_PATTERNS,
                "integrating fewer patterns than the three expected pillars"
            );
        }
        if patterns.len() > 1 {
            debug!(
                skipped = patterns.len() - 1,
                "only the first pattern is folded through the waltz"
            );
        }

        self.recursion_depth += 1;

        let ignited = self.run_phase(WaltzPhase::Initiation, primary.clone(), Self::ignite);
        let propagated = self.run_phase(WaltzPhase::Transformation, ignited.clone(), Self::propagate);
        let integrated = self.run_phase(WaltzPhase::Integration, propagated.clone(), Self::bind);

        self.current_phase = WaltzPhase::Completion;
        let completed = Self::close(&ignited, &propagated, &integrated);
        self.record_step(WaltzPhase::Completion, integrated, completed.clone());
        self.completed = true;

        let result = WaltzResult {
            pattern: completed,
            steps: self.steps.iter().map(WaltzStep::summary).collect(),
            phase_count: self.steps.len(),
            recursion_depth: self.recursion_depth,
            energy_conservation: self.energy_conservation,
        };
        self.waltz_history.push(result.clone());

        DanceOutcome::Complete(result)
    }

    /// Undo the last completion. Best-effort, not a true undo: the popped
    /// history entry is returned for inspection, the step log is cleared,
    /// and the recursion depth is decremented (floor zero).
    pub fn reverse_waltz(&mut self) -> ReversalOutcome {
        if self.waltz_history.is_empty() {
            return ReversalOutcome::NoHistory;
        }
        if !self.completed {
            return ReversalOutcome::NotComplete;
        }

        let Some(last) = self.waltz_history.pop() else {
            return ReversalOutcome::NoHistory;
        };

        self.completed = false;
        self.steps.clear();
        self.step_counter = 0;
        self.current_phase = WaltzPhase::Initiation;
        self.energy_conservation = WaltzPhase::Initiation.energy();
        self.recursion_depth = self.recursion_depth.saturating_sub(1);

        ReversalOutcome::Reversed {
            result: last,
            recursion_depth: self.recursion_depth,
        }
    }

    /// Clear all steps, history, counters, and energy unconditionally.
    pub fn reset(&mut self) {
        self.steps.clear();
        self.step_counter = 0;
        self.current_phase = WaltzPhase::Initiation;
        self.completed = false;
        self.energy_conservation = WaltzPhase::Initiation.energy();
        self.recursion_depth = 0;
        self.waltz_history.clear();
        self.initialized_at = Utc::now();
    }

    // ── Phase transformations ────────────────────────────────────────

    fn run_phase(
        &mut self,
        phase: WaltzPhase,
        input: PatternRecord,
        transform: fn(&PatternRecord) -> PatternRecord,
    ) -> PatternRecord {
        self.current_phase = phase;
        let output = transform(&input);
        self.record_step(phase, input, output.clone());
        output
    }

    fn record_step(&mut self, phase: WaltzPhase, input: PatternRecord, output: PatternRecord) {
        self.energy_conservation = phase.energy();
        self.step_counter += 1;
        self.steps
            .push(WaltzStep::new(phase, input, output, self.step_counter));
    }

    /// Phase 1: Phoenix establishes the core identity that the later
    /// phases propagate and bind.
    fn ignite(pattern: &PatternRecord) -> PatternRecord {
        let core = pattern.name().to_string();
        PatternRecord::new()
            .with_field("original", pattern.clone())
            .with_field("pillar", WaltzPhase::Initiation.pillar())
            .with_field("mode", WaltzPhase::Initiation.mode())
            .with_field("phase", "INITIATION")
            .with_field("transformation", "ignition")
            .with_field("core", &core)
            .with_field("ignited", true)
            .with_field("apex", format!("apex::{core}"))
            .with_field("phoenix_signature", ["Burn", "Collapse", "Rise"])
    }

    /// Phase 2: Hydrogenesi extends the ignited core into a lineage.
    fn propagate(ignited: &PatternRecord) -> PatternRecord {
        let core = ignited
            .get("core")
            .and_then(|v| v.as_str())
            .unwrap_or(waltz_types::UNNAMED);
        PatternRecord::new()
            .with_field("ignited", ignited.clone())
            .with_field("pillar", WaltzPhase::Transformation.pillar())
            .with_field("mode", WaltzPhase::Transformation.mode())
            .with_field("phase", "TRANSFORMATION")
            .with_field("transformation", "propagation")
            .with_field("lineage", format!("ROOT::{core}::GEN-1"))
            .with_field("propagated", true)
            .with_field("recursive_depth", 1)
            .with_field("hydrogenesi_signature", ["Compress", "Ignite", "Replicate"])
    }

    /// Phase 3: The Third binds the lineage at the sovereign threshold.
    fn bind(propagated: &PatternRecord) -> PatternRecord {
        PatternRecord::new()
            .with_field("propagated", propagated.clone())
            .with_field("pillar", WaltzPhase::Integration.pillar())
            .with_field("mode", WaltzPhase::Integration.mode())
            .with_field("phase", "INTEGRATION")
            .with_field("transformation", "binding")
            .with_field("threshold_reached", true)
            .with_field("bound", true)
            .with_field("sovereignty", true)
            .with_field("the_third_signature", ["At Threshold", "Hold", "Bind"])
    }

    /// Phase 4: triadic closure, referencing all three prior outputs.
    fn close(
        ignited: &PatternRecord,
        propagated: &PatternRecord,
        integrated: &PatternRecord,
    ) -> PatternRecord {
        PatternRecord::new()
            .with_field("integrated", integrated.clone())
            .with_field("phase", "COMPLETION")
            .with_field("mode", WaltzPhase::Completion.mode())
            .with_field("transformation", "closure")
            .with_field("triadic_closure", true)
            .with_field("sovereignty_confirmed", true)
            .with_field("waltz_complete", true)
            .with_field(
                "triad",
                json!({
                    "phoenix": ignited,
                    "hydrogenesi": propagated,
                    "the_third": integrated,
                }),
            )
            .with_field(
                "unified_signature",
                [
                    "Begin", "Extend", "Hold", "Ignite", "Propagate", "Bind", "Sovereign",
                ],
            )
    }

    // ── Read accessors ───────────────────────────────────────────────

    /// The ordered step log for the current run.
    pub fn steps(&self) -> &[WaltzStep] {
        &self.steps
    }

    /// Full choreography detail, including per-step payloads.
    pub fn choreography(&self) -> &[WaltzStep] {
        &self.steps
    }

    /// Results of completed runs, oldest first.
    pub fn history(&self) -> &[WaltzResult] {
        &self.waltz_history
    }

    /// Whether the waltz has completed and is refusing further dances.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Whether a dance would be accepted right now.
    pub fn is_ready(&self) -> bool {
        !self.completed && self.recursion_depth < self.max_recursion
    }

    pub fn current_phase(&self) -> WaltzPhase {
        self.current_phase
    }

    pub fn energy_conservation(&self) -> f64 {
        self.energy_conservation
    }

    pub fn recursion_depth(&self) -> u32 {
        self.recursion_depth
    }

    pub fn max_recursion(&self) -> u32 {
        self.max_recursion
    }

    /// When this instance was constructed (or last reset).
    pub fn initialized_at(&self) -> DateTime<Utc> {
        self.initialized_at
    }

    /// Step counts per phase, every phase present.
    pub fn phase_summary(&self) -> BTreeMap<WaltzPhase, usize> {
        let mut summary: BTreeMap<WaltzPhase, usize> =
            WaltzPhase::ALL.iter().map(|p| (*p, 0)).collect();
        for step in &self.steps {
            *summary.entry(step.phase).or_insert(0) += 1;
        }
        summary
    }

    /// Detailed operational status snapshot.
    pub fn status(&self) -> WaltzStatusReport {
        WaltzStatusReport {
            ready: self.is_ready(),
            recursion_depth: self.recursion_depth,
            max_recursion: self.max_recursion,
            steps_taken: self.steps.len(),
            energy_conservation: self.energy_conservation,
            elapsed_secs: (Utc::now() - self.initialized_at).num_milliseconds() as f64 / 1000.0,
            current_phase: self.current_phase,
            completed: self.completed,
            history_count: self.waltz_history.len(),
        }
    }
}

/// Operational status of a pipeline instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaltzStatusReport {
    pub ready: bool,
    pub recursion_depth: u32,
    pub max_recursion: u32,
    pub steps_taken: usize,
    pub energy_conservation: f64,
    pub elapsed_secs: f64,
    pub current_phase: WaltzPhase,
    pub completed: bool,
    pub history_count: usize,
}
