//! Subcommands of the `playcaller` binary

pub mod random;
pub mod train;

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::{
    adapters::{CsvOutcomeTable, SyntheticSource},
    ports::OutcomeSource,
};

/// Open the outcome source named on the command line.
///
/// A CSV outcome table when a path is given, otherwise the synthetic
/// generator.
pub(crate) fn open_outcome_source(outcomes: Option<&Path>) -> Result<Box<dyn OutcomeSource>> {
    match outcomes {
        Some(path) => {
            let table = CsvOutcomeTable::from_path(path)
                .with_context(|| format!("loading outcome table {}", path.display()))?;
            info!(
                "loaded {} outcome rows covering {} situations from {}",
                table.len(),
                table.situations(),
                path.display()
            );
            Ok(Box::new(table))
        }
        None => Ok(Box::new(SyntheticSource::new())),
    }
}
