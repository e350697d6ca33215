//! Play-calling reinforcement learning
//!
//! This crate provides:
//! - An American-football play-calling environment driven by weighted
//!   historical outcomes ([`football::PlaycallingEnv`])
//! - A tabular temporal-difference agent with value iteration ([`td::TdAgent`])
//! - A training pipeline with pluggable observers and a random-play baseline
//! - Outcome sources: scripted, synthetic and CSV outcome tables

pub mod adapters;
pub mod cli;
pub mod error;
pub mod football;
pub mod pipeline;
pub mod ports;
pub mod td;

pub use error::{Error, Result};
pub use football::{Observation, PlayCall, PlaycallingEnv};
pub use td::{TdAgent, TdConfig};

use rand::{SeedableRng, rngs::StdRng};

/// Seeded generator when a seed is given, OS-seeded otherwise
pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}
