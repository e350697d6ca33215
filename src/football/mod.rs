//! Football possession model
//!
//! This module provides:
//! - [`Observation`]: the six-field possession state
//! - [`PlayCall`]: the fixed set of plays the offense can call
//! - [`PlayOutcome`] and [`OutcomeDraw`]: weighted play results and sampling
//! - [`PlaycallingEnv`]: the reset/step environment

pub mod action;
pub mod environment;
pub mod observation;
pub mod outcome;

pub use action::PlayCall;
pub use environment::{PlaycallingEnv, Step, apply_outcome, assess};
pub use observation::Observation;
pub use outcome::{FallbackReason, OutcomeDraw, OutcomeKind, OutcomeQuery, PlayOutcome};
