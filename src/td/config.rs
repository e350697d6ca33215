//! Hyper-parameters for the TD agent.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for creating a [`super::TdAgent`].
///
/// # Examples
///
/// ```
/// use playcaller::td::TdConfig;
///
/// let config = TdConfig::default().with_gamma(0.9).with_alpha(0.1).with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdConfig {
    /// Discount rate γ; higher values discount future rewards less
    pub gamma: f64,
    /// Learning rate α applied to each bootstrapped delta
    pub alpha: f64,
    /// Random seed for exploration and outcome sampling
    pub seed: Option<u64>,
}

impl TdConfig {
    pub const DEFAULT_GAMMA: f64 = 0.95;
    pub const DEFAULT_ALPHA: f64 = 0.05;

    pub fn new(gamma: f64, alpha: f64) -> Self {
        Self {
            gamma,
            alpha,
            seed: None,
        }
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that γ and α lie in [0, 1].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("gamma", self.gamma), ("alpha", self.alpha)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for TdConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GAMMA, Self::DEFAULT_ALPHA)
    }
}
