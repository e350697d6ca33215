//! Ports (trait boundaries) for external collaborators.
//!
//! The environment only knows the outcome source through [`OutcomeSource`],
//! and the training pipeline only reports through [`Observer`]. Adapters
//! in [`crate::adapters`] and [`crate::pipeline::observers`] implement them.

pub mod observer;
pub mod outcome_source;

pub use observer::Observer;
pub use outcome_source::OutcomeSource;
