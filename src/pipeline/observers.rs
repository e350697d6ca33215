//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the training loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::training::{IterationReport, TrainingResult};
use crate::{Result, ports::Observer};

/// One named scalar at a step index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarRecord {
    pub name: String,
    pub value: f64,
    pub step: usize,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self { progress_bar: None }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, max_iterations: usize) -> Result<()> {
        let pb = ProgressBar::new(max_iterations as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} iterations ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_iteration_end(&mut self, report: &IterationReport) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(report.iteration as u64);
            pb.set_message(format!(
                "reward {:.3}, best {:.3}",
                report.average_reward, report.best_reward
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self, result: &TrainingResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            let status = if result.solved { "solved" } else { "stopped" };
            pb.finish_with_message(format!("{status}, best {:.3}", result.best_reward));
        }
        Ok(())
    }
}

/// Metrics observer - Keeps every scalar and iteration report in memory
#[derive(Debug, Default)]
pub struct MetricsObserver {
    scalars: Vec<ScalarRecord>,
    reports: Vec<IterationReport>,
    episodes: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// All scalars received, in arrival order
    pub fn scalars(&self) -> &[ScalarRecord] {
        &self.scalars
    }

    /// Values of one named series, in step order
    pub fn series(&self, name: &str) -> Vec<(usize, f64)> {
        self.scalars
            .iter()
            .filter(|record| record.name == name)
            .map(|record| (record.step, record.value))
            .collect()
    }

    pub fn reports(&self) -> &[IterationReport] {
        &self.reports
    }

    /// Greedy evaluation episodes observed
    pub fn episodes(&self) -> usize {
        self.episodes
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _iteration: usize, _episode: usize, _reward: f64) -> Result<()> {
        self.episodes += 1;
        Ok(())
    }

    fn on_scalar(&mut self, name: &str, value: f64, step: usize) -> Result<()> {
        self.scalars.push(ScalarRecord {
            name: name.to_string(),
            value,
            step,
        });
        Ok(())
    }

    fn on_iteration_end(&mut self, report: &IterationReport) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}

/// JSONL observer - Writes each scalar as one JSON object per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self { writer })
    }
}

impl Observer for JsonlObserver {
    fn on_scalar(&mut self, name: &str, value: f64, step: usize) -> Result<()> {
        let record = ScalarRecord {
            name: name.to_string(),
            value,
            step,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_iteration_end(&mut self, _report: &IterationReport) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
