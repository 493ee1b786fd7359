//! Waltz phases: the four fixed stages of the choreography
//!
//! Every run of the pipeline visits all four phases in order. Each phase
//! is bound to one pillar, one mode, one transformation label, and one
//! point on the energy-conservation schedule (1.0 → 1.0 → 0.95 → 0.90).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four fixed pipeline stages.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WaltzPhase {
    /// Phase 1: Phoenix ignites (BEGIN mode).
    Initiation,
    /// Phase 2: Hydrogenesi propagates (EXTEND mode).
    Transformation,
    /// Phase 3: The Third binds (HOLD mode).
    Integration,
    /// Phase 4: Triadic closure achieved (COMPLETE mode).
    Completion,
}

impl WaltzPhase {
    /// All phases in execution order.
    pub const ALL: [WaltzPhase; 4] = [
        WaltzPhase::Initiation,
        WaltzPhase::Transformation,
        WaltzPhase::Integration,
        WaltzPhase::Completion,
    ];

    /// The pillar that owns this phase.
    pub fn pillar(&self) -> &'static str {
        match self {
            WaltzPhase::Initiation => "Phoenix",
            WaltzPhase::Transformation => "Hydrogenesi",
            WaltzPhase::Integration => "The Third",
            WaltzPhase::Completion => "Unified",
        }
    }

    /// The mode the pillar operates in during this phase.
    pub fn mode(&self) -> &'static str {
        match self {
            WaltzPhase::Initiation => "BEGIN",
            WaltzPhase::Transformation => "EXTEND",
            WaltzPhase::Integration => "HOLD",
            WaltzPhase::Completion => "COMPLETE",
        }
    }

    /// Human-readable label of the transformation this phase applies.
    pub fn transformation(&self) -> &'static str {
        match self {
            WaltzPhase::Initiation => "Phoenix Ignition",
            WaltzPhase::Transformation => "Hydrogenesi Propagation",
            WaltzPhase::Integration => "The Third Binding",
            WaltzPhase::Completion => "Triadic Closure",
        }
    }

    /// The energy-conservation value after this phase runs.
    ///
    /// Not a physical quantity — a fixed schedule carried on output.
    pub fn energy(&self) -> f64 {
        match self {
            WaltzPhase::Initiation => 1.0,
            WaltzPhase::Transformation => 0.95,
            WaltzPhase::Integration => 0.90,
            WaltzPhase::Completion => 0.90,
        }
    }

    /// Lowercase tag used in logs and exports.
    pub fn tag(&self) -> &'static str {
        match self {
            WaltzPhase::Initiation => "initiation",
            WaltzPhase::Transformation => "transformation",
            WaltzPhase::Integration => "integration",
            WaltzPhase::Completion => "completion",
        }
    }
}

impl fmt::Display for WaltzPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        assert!(WaltzPhase::Initiation < WaltzPhase::Transformation);
        assert!(WaltzPhase::Integration < WaltzPhase::Completion);
        assert_eq!(WaltzPhase::ALL.len(), 4);
    }

    #[test]
    fn test_energy_schedule() {
        let energies: Vec<f64> = WaltzPhase::ALL.iter().map(|p| p.energy()).collect();
        assert_eq!(energies, vec![1.0, 0.95, 0.90, 0.90]);
    }

    #[test]
    fn test_pillar_mode_bindings() {
        assert_eq!(WaltzPhase::Initiation.pillar(), "Phoenix");
        assert_eq!(WaltzPhase::Initiation.mode(), "BEGIN");
        assert_eq!(WaltzPhase::Transformation.pillar(), "Hydrogenesi");
        assert_eq!(WaltzPhase::Integration.mode(), "HOLD");
        assert_eq!(WaltzPhase::Completion.pillar(), "Unified");
    }

    #[test]
    fn test_serde_tag() {
        let json = serde_json::to_string(&WaltzPhase::Transformation).unwrap();
        assert_eq!(json, "\"transformation\"");
        let back: WaltzPhase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, WaltzPhase::Transformation);
    }
}
