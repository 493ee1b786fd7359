//! Outcomes of pipeline operations
//!
//! Expected state conditions — no patterns, already complete, recursion
//! exhausted, nothing to reverse — are modeled as outcome variants that
//! callers branch on, not as errors. Only genuinely unexpected failures
//! (I/O, unknown export formats) use `Result` in this workspace.

use crate::{PatternRecord, StepSummary};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The terminal snapshot of one full waltz run.
///
/// Immutable once produced; one copy is appended to the pipeline's
/// history and one may be stored in the pattern cache.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaltzResult {
    /// The completion record, carrying the full triad view.
    pub pattern: PatternRecord,
    /// Payload-free summaries of the four recorded steps.
    pub steps: Vec<StepSummary>,
    /// Number of steps executed in this run.
    pub phase_count: usize,
    /// Recursion depth at completion.
    pub recursion_depth: u32,
    /// Final energy-conservation value (0.90 on completion).
    pub energy_conservation: f64,
}

/// Status vocabulary returned by `dance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaltzStatus {
    WaltzComplete,
    NoPatterns,
    AlreadyComplete,
    MaxRecursion,
}

impl WaltzStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaltzStatus::WaltzComplete => "WALTZ_COMPLETE",
            WaltzStatus::NoPatterns => "NO_PATTERNS",
            WaltzStatus::AlreadyComplete => "ALREADY_COMPLETE",
            WaltzStatus::MaxRecursion => "MAX_RECURSION",
        }
    }
}

impl fmt::Display for WaltzStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened when `dance` was invoked.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DanceOutcome {
    /// All four phases ran; the result was appended to history.
    Complete(WaltzResult),
    /// The input sequence was empty. No state changed.
    NoPatterns,
    /// The instance already completed a run and was not reset.
    AlreadyComplete { steps: usize },
    /// The recursion-depth bound was reached. No state changed.
    MaxRecursion { depth: u32 },
}

impl DanceOutcome {
    pub fn status(&self) -> WaltzStatus {
        match self {
            DanceOutcome::Complete(_) => WaltzStatus::WaltzComplete,
            DanceOutcome::NoPatterns => WaltzStatus::NoPatterns,
            DanceOutcome::AlreadyComplete { .. } => WaltzStatus::AlreadyComplete,
            DanceOutcome::MaxRecursion { .. } => WaltzStatus::MaxRecursion,
        }
    }

    /// Whether this outcome carries a completed result.
    pub fn is_complete(&self) -> bool {
        matches!(self, DanceOutcome::Complete(_))
    }

    /// Borrow the completed result, if any.
    pub fn result(&self) -> Option<&WaltzResult> {
        match self {
            DanceOutcome::Complete(result) => Some(result),
            _ => None,
        }
    }

    /// Take the completed result, if any.
    pub fn into_result(self) -> Option<WaltzResult> {
        match self {
            DanceOutcome::Complete(result) => Some(result),
            _ => None,
        }
    }
}

/// Status vocabulary returned by `reverse_waltz`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReversalStatus {
    Reversed,
    NoHistory,
    NotComplete,
}

impl ReversalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReversalStatus::Reversed => "REVERSED",
            ReversalStatus::NoHistory => "NO_HISTORY",
            ReversalStatus::NotComplete => "NOT_COMPLETE",
        }
    }
}

impl fmt::Display for ReversalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened when `reverse_waltz` was invoked.
///
/// Reversal is best-effort, not a true undo: the popped history entry is
/// returned for inspection, but step payloads are discarded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ReversalOutcome {
    /// The most recent completion was popped and state rewound.
    Reversed {
        result: WaltzResult,
        recursion_depth: u32,
    },
    /// No completed run exists in history.
    NoHistory,
    /// The instance has history but is not currently complete.
    NotComplete,
}

impl ReversalOutcome {
    pub fn status(&self) -> ReversalStatus {
        match self {
            ReversalOutcome::Reversed { .. } => ReversalStatus::Reversed,
            ReversalOutcome::NoHistory => ReversalStatus::NoHistory,
            ReversalOutcome::NotComplete => ReversalStatus::NotComplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_vocabulary() {
        assert_eq!(WaltzStatus::WaltzComplete.to_string(), "WALTZ_COMPLETE");
        assert_eq!(WaltzStatus::NoPatterns.to_string(), "NO_PATTERNS");
        assert_eq!(WaltzStatus::AlreadyComplete.to_string(), "ALREADY_COMPLETE");
        assert_eq!(WaltzStatus::MaxRecursion.to_string(), "MAX_RECURSION");
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&WaltzStatus::MaxRecursion).unwrap();
        assert_eq!(json, "\"MAX_RECURSION\"");
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = DanceOutcome::NoPatterns;
        assert_eq!(outcome.status(), WaltzStatus::NoPatterns);
        assert!(!outcome.is_complete());
        assert!(outcome.result().is_none());

        let outcome = DanceOutcome::Complete(WaltzResult {
            pattern: PatternRecord::named("done"),
            steps: Vec::new(),
            phase_count: 4,
            recursion_depth: 1,
            energy_conservation: 0.90,
        });
        assert!(outcome.is_complete());
        assert_eq!(outcome.result().unwrap().phase_count, 4);
    }

    #[test]
    fn test_reversal_statuses() {
        assert_eq!(ReversalOutcome::NoHistory.status(), ReversalStatus::NoHistory);
        assert_eq!(
            ReversalOutcome::NotComplete.status().as_str(),
            "NOT_COMPLETE"
        );
    }
}
