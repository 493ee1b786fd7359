//! Waltz steps: the record of one executed stage

use crate::{PatternRecord, WaltzPhase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One executed stage of the choreography.
///
/// Steps are owned by the pipeline instance that produced them and are
/// retained, in order, until the instance is reset. Step numbers are
/// strictly increasing within one run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaltzStep {
    /// Which of the four fixed stages this step executed.
    pub phase: WaltzPhase,
    /// The record the stage consumed.
    pub input: PatternRecord,
    /// The record the stage produced (wraps the input, never mutates it).
    pub output: PatternRecord,
    /// Human-readable transformation label.
    pub transformation: String,
    /// Position within the run, starting at 1.
    pub step_number: u32,
    /// When the step was recorded.
    pub timestamp: DateTime<Utc>,
}

impl WaltzStep {
    /// Create a step for the given phase, stamped now.
    pub fn new(
        phase: WaltzPhase,
        input: PatternRecord,
        output: PatternRecord,
        step_number: u32,
    ) -> Self {
        Self {
            phase,
            input,
            output,
            transformation: phase.transformation().to_string(),
            step_number,
            timestamp: Utc::now(),
        }
    }

    /// The pillar that executed this step.
    pub fn pillar(&self) -> &'static str {
        self.phase.pillar()
    }

    /// The mode the pillar operated in.
    pub fn mode(&self) -> &'static str {
        self.phase.mode()
    }

    /// A payload-free view of this step.
    pub fn summary(&self) -> StepSummary {
        StepSummary {
            step_number: self.step_number,
            phase: self.phase,
            pillar: self.pillar().to_string(),
            mode: self.mode().to_string(),
            transformation: self.transformation.clone(),
            timestamp: self.timestamp,
        }
    }
}

impl fmt::Display for WaltzStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {}: {} | {} --[{}]--> {}",
            self.step_number,
            self.phase,
            self.pillar(),
            self.transformation,
            self.mode()
        )
    }
}

/// A step with payloads stripped, suitable for results and exports.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepSummary {
    pub step_number: u32,
    pub phase: WaltzPhase,
    pub pillar: String,
    pub mode: String,
    pub transformation: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_delegates_to_phase() {
        let step = WaltzStep::new(
            WaltzPhase::Integration,
            PatternRecord::named("in"),
            PatternRecord::named("out"),
            3,
        );
        assert_eq!(step.pillar(), "The Third");
        assert_eq!(step.mode(), "HOLD");
        assert_eq!(step.transformation, "The Third Binding");
    }

    #[test]
    fn test_step_display() {
        let step = WaltzStep::new(
            WaltzPhase::Initiation,
            PatternRecord::named("in"),
            PatternRecord::named("out"),
            1,
        );
        assert_eq!(
            step.to_string(),
            "Step 1: initiation | Phoenix --[Phoenix Ignition]--> BEGIN"
        );
    }

    #[test]
    fn test_summary_strips_payloads() {
        let step = WaltzStep::new(
            WaltzPhase::Completion,
            PatternRecord::named("in"),
            PatternRecord::named("out"),
            4,
        );
        let summary = step.summary();
        assert_eq!(summary.step_number, 4);
        assert_eq!(summary.pillar, "Unified");
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("\"in\""));
    }
}
