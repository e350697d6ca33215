//! Training and evaluation pipeline
//!
//! This module provides:
//! - The training loop alternating exploration and value iteration
//! - Observers for progress, in-memory metrics and JSONL metric files
//! - A random-play baseline

pub mod baseline;
pub mod observers;
pub mod training;

pub use baseline::{EpisodeSummary, mean_reward, random_play};
pub use observers::{JsonlObserver, MetricsObserver, ProgressObserver, ScalarRecord};
pub use training::{IterationReport, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::Observer;
