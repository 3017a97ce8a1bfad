//! Scoring and interpretation engine for standardized personality instruments.
//!
//! Every scorer is a pure function from keyed answers plus caller supplied
//! configuration to a [`scoring::ScoreResult`]. Nothing here holds state between
//! calls, so results can be computed from any number of threads at once.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
