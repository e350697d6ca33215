//! CLI infrastructure for the play-calling toolkit
//!
//! This module provides the command-line interface for training the TD
//! agent and for running the random-play baseline.

pub mod commands;
pub mod output;
