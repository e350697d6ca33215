//! Adapters implementing domain ports.
//!
//! Outcome sources that plug into [`crate::ports::OutcomeSource`]:
//! - [`ScriptedSource`]: replays fixed outcome lists (tests, demos)
//! - [`SyntheticSource`]: random stand-in for historical data
//! - [`CsvOutcomeTable`]: pre-aggregated outcome rows loaded from CSV

pub mod csv_table;
pub mod scripted_source;
pub mod synthetic_source;

pub use csv_table::{CsvOutcomeTable, OutcomeRecord};
pub use scripted_source::ScriptedSource;
pub use synthetic_source::SyntheticSource;
