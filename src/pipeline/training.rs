//! Training pipeline alternating exploration and value iteration

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    football::PlaycallingEnv,
    ports::{Observer, OutcomeSource},
    td::TdAgent,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Random exploration steps per iteration
    pub random_steps: usize,

    /// Greedy episodes averaged per evaluation
    pub test_episodes: usize,

    /// Average reward above which the task counts as solved
    pub solved_reward: f64,

    /// Iteration cap
    pub max_iterations: usize,

    /// Best reward before any evaluation
    pub initial_best_reward: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            random_steps: 100,
            test_episodes: 80,
            solved_reward: 3.0,
            max_iterations: 100,
            initial_best_reward: -7.0,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.test_episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "test_episodes must be at least 1".to_string(),
            });
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_iterations must be at least 1".to_string(),
            });
        }
        if !self.solved_reward.is_finite() || !self.initial_best_reward.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: "reward thresholds must be finite".to_string(),
            });
        }
        Ok(())
    }
}

/// Summary of one training iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    /// 1-based iteration number
    pub iteration: usize,
    /// Mean greedy episode reward
    pub average_reward: f64,
    /// Best mean reward so far
    pub best_reward: f64,
    /// Whether this iteration raised the best reward
    pub improved: bool,
    /// States with recorded transitions
    pub states_seen: usize,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Iterations completed
    pub iterations: usize,

    /// Best mean evaluation reward
    pub best_reward: f64,

    /// Mean evaluation reward of the final iteration
    pub last_reward: f64,

    /// Whether the solved threshold was exceeded
    pub solved: bool,

    /// Mean evaluation reward per iteration
    pub rewards: Vec<f64>,

    /// States with recorded transitions at the end of training
    pub states_seen: usize,
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training driver for a TD agent
///
/// Each iteration explores with random play calls, refreshes values, then
/// averages the greedy policy's reward over the test episodes. Training stops
/// once the average exceeds the solved threshold or the iteration cap is hit.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train `agent`, evaluating its greedy policy on `test_env`.
    pub fn run<S, T>(
        &mut self,
        agent: &mut TdAgent<S>,
        test_env: &mut PlaycallingEnv<T>,
    ) -> Result<TrainingResult>
    where
        S: OutcomeSource,
        T: OutcomeSource,
    {
        self.config.validate()?;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.max_iterations)?;
        }

        let mut best_reward = self.config.initial_best_reward;
        let mut rewards = Vec::new();
        let mut solved = false;

        for iteration in 1..=self.config.max_iterations {
            for observer in &mut self.observers {
                observer.on_iteration_start(iteration)?;
            }

            agent.play_n_random_steps(self.config.random_steps)?;
            agent.value_iteration();

            let average_reward = self.evaluate(iteration, agent, test_env)?;
            rewards.push(average_reward);

            let improved = average_reward > best_reward;
            if improved {
                info!("best reward updated {best_reward:.3} -> {average_reward:.3}");
                best_reward = average_reward;
            }

            let report = IterationReport {
                iteration,
                average_reward,
                best_reward,
                improved,
                states_seen: agent.transitions().states().len(),
            };
            for observer in &mut self.observers {
                observer.on_scalar("reward", average_reward, iteration)?;
                observer.on_scalar("best_reward", best_reward, iteration)?;
                observer.on_iteration_end(&report)?;
            }

            if average_reward > self.config.solved_reward {
                info!("solved in {iteration} iterations");
                solved = true;
                break;
            }
        }

        if !solved {
            info!(
                "stopping after {} iterations without exceeding {:.3}",
                rewards.len(),
                self.config.solved_reward
            );
        }

        let result = TrainingResult {
            iterations: rewards.len(),
            best_reward,
            last_reward: rewards.last().copied().unwrap_or(best_reward),
            solved,
            rewards,
            states_seen: agent.transitions().states().len(),
        };

        for observer in &mut self.observers {
            observer.on_training_end(&result)?;
        }

        Ok(result)
    }

    fn evaluate<S, T>(
        &mut self,
        iteration: usize,
        agent: &mut TdAgent<S>,
        test_env: &mut PlaycallingEnv<T>,
    ) -> Result<f64>
    where
        S: OutcomeSource,
        T: OutcomeSource,
    {
        let mut total = 0.0;
        for episode in 0..self.config.test_episodes {
            let reward = agent.play_episode(test_env)?;
            total += reward;
            for observer in &mut self.observers {
                observer.on_episode_end(iteration, episode, reward)?;
            }
        }
        Ok(total / self.config.test_episodes as f64)
    }
}
