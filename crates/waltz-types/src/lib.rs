//! Domain types for the Three-Finger Waltz
//!
//! The waltz integrates a pattern across the three pillars — Phoenix
//! (BEGIN), Hydrogenesi (EXTEND), and The Third (HOLD) — through a fixed
//! four-phase choreography ending in triadic closure.
//!
//! # Key Concepts
//!
//! - **PatternRecord**: The opaque input unit consumed by the pipeline.
//!   An ordered string-keyed map with no fixed schema; only an optional
//!   `name` field is interpreted, for display.
//! - **WaltzPhase**: One of the four fixed pipeline stages. Each phase
//!   carries its pillar, mode, transformation label, and the point it
//!   occupies on the energy-conservation schedule.
//! - **WaltzStep**: The record of one executed stage — what went in, what
//!   came out, and when.
//! - **WaltzResult**: The terminal snapshot of one full run. Immutable
//!   once produced; cached and appended to the pipeline's history.
//! - **DanceOutcome** / **ReversalOutcome**: Expected state conditions
//!   (no patterns, already complete, max recursion, nothing to reverse)
//!   are outcomes callers branch on, never errors.
//!
//! # Design Principles
//!
//! 1. Pattern payloads are opaque. The pipeline wraps, it never mutates.
//! 2. Every stage appends exactly one step; step numbers only reset on
//!    a full reset.
//! 3. Serialization is canonical: record fields live in an ordered map so
//!    the same pattern always produces the same bytes.

#![deny(unsafe_code)]

mod outcome;
mod pattern;
mod phase;
mod step;

pub use outcome::*;
pub use pattern::*;
pub use phase::*;
pub use step::*;
