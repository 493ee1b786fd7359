//! Three-Finger Waltz pipeline runtime
//!
//! The engine takes a pattern through four ordered phases — Initiation
//! (Phoenix, BEGIN), Transformation (Hydrogenesi, EXTEND), Integration
//! (The Third, HOLD), and Completion (Unified, COMPLETE) — recording one
//! step per phase and an energy-conservation schedule along the way.
//!
//! Three layers wrap the same core:
//!
//! - [`ThreeFingerWaltz`]: the bare pipeline state machine.
//! - [`CachedWaltz`]: checks an LRU [`PatternCache`] before running and
//!   stores successful results after.
//! - [`InstrumentedWaltz`]: adds wall-clock timing, structured tracing
//!   events, and running [`WaltzMetrics`].
//!
//! Everything here is single-owner, single-thread, synchronous. Shared
//! use across concurrent callers must be serialized by the caller.

#![deny(unsafe_code)]

mod cache;
mod cached;
mod telemetry;
mod waltz;

pub use cache::*;
pub use cached::*;
pub use telemetry::*;
pub use waltz::*;
