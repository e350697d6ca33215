//! Random-play baseline

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    football::{PlayCall, PlaycallingEnv},
    ports::OutcomeSource,
};

/// Length and return of one episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub steps: usize,
    pub total_reward: f64,
}

/// Play `episodes` possessions calling plays uniformly at random.
///
/// Gives the reward a policy must beat to be better than guessing.
pub fn random_play<S, R>(
    env: &mut PlaycallingEnv<S>,
    episodes: usize,
    rng: &mut R,
) -> Result<Vec<EpisodeSummary>>
where
    S: OutcomeSource,
    R: Rng + ?Sized,
{
    let mut summaries = Vec::with_capacity(episodes);
    for _ in 0..episodes {
        env.reset();
        let mut summary = EpisodeSummary {
            steps: 0,
            total_reward: 0.0,
        };
        loop {
            let step = env.step(PlayCall::sample(rng))?;
            summary.total_reward += step.reward;
            summary.steps += 1;
            if step.done {
                break;
            }
        }
        info!(
            "episode done in {} steps with {:.2} reward",
            summary.steps, summary.total_reward
        );
        summaries.push(summary);
    }
    Ok(summaries)
}

/// Mean total reward over a set of episodes; 0.0 when empty
pub fn mean_reward(summaries: &[EpisodeSummary]) -> f64 {
    if summaries.is_empty() {
        0.0
    } else {
        summaries.iter().map(|s| s.total_reward).sum::<f64>() / summaries.len() as f64
    }
}
