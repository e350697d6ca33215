//! Observer port - abstraction for training observation and metrics
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling the training
//! loop to specific output formats or metrics backends.

use crate::{
    Result,
    pipeline::{IterationReport, TrainingResult},
};

/// Observer trait for monitoring training
///
/// Observers can be composed to collect different kinds of data during
/// training: progress bars, JSONL metric files, in-memory histories.
///
/// # Event Sequence
///
/// 1. `on_training_start(max_iterations)` - once
/// 2. For each iteration:
///    - `on_iteration_start(iteration)`
///    - `on_episode_end(...)` - for each greedy test episode
///    - `on_scalar(...)` - for each metric the pipeline publishes
///    - `on_iteration_end(report)`
/// 3. `on_training_end(result)` - once
///
/// # Examples
///
/// ```no_run
/// use playcaller::ports::Observer;
///
/// struct RewardPrinter;
///
/// impl Observer for RewardPrinter {
///     fn on_scalar(&mut self, name: &str, value: f64, step: usize) -> playcaller::Result<()> {
///         println!("{step:>4} {name} = {value:.3}");
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Parameters
    ///
    /// * `max_iterations` - Iteration cap; training may stop earlier once solved
    fn on_training_start(&mut self, _max_iterations: usize) -> Result<()> {
        Ok(())
    }

    /// Called before the exploration phase of an iteration (1-based).
    fn on_iteration_start(&mut self, _iteration: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each greedy evaluation episode.
    fn on_episode_end(
        &mut self,
        _iteration: usize,
        _episode: usize,
        _total_reward: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Metrics sink: receives a named scalar at a step index.
    ///
    /// The pipeline publishes `reward` and `best_reward` once per iteration.
    fn on_scalar(&mut self, _name: &str, _value: f64, _step: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an iteration is complete.
    fn on_iteration_end(&mut self, _report: &IterationReport) -> Result<()> {
        Ok(())
    }

    /// Called when training completes, solved or not.
    ///
    /// Use this to finalize outputs, flush files, or display summaries.
    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        Ok(())
    }
}
