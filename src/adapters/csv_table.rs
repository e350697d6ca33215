//! Outcome table loaded from pre-aggregated CSV rows.

use std::{collections::HashMap, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    football::{OutcomeKind, OutcomeQuery, PlayCall, PlayOutcome},
    ports::OutcomeSource,
};

/// One CSV row: an outcome and its weight for a situation
///
/// Header: `down,to_go,position,play,kind,yards,weight`. `position` is the
/// distance from the opponent's goal line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub down: i32,
    pub to_go: i32,
    pub position: i32,
    pub play: String,
    pub kind: String,
    pub yards: i32,
    pub weight: f64,
}

type SituationKey = (i32, i32, i32, PlayCall);

#[derive(Debug, Clone)]
struct RawOutcome {
    kind: String,
    yards: i32,
    weight: f64,
}

/// Exact-match lookup table of outcome distributions.
///
/// Play names are validated on load. Outcome kinds are kept as written and
/// parsed per query, so a row with an unknown kind only fails the step that
/// draws from it.
#[derive(Debug, Clone, Default)]
pub struct CsvOutcomeTable {
    rows: HashMap<SituationKey, Vec<RawOutcome>>,
    records: usize,
}

impl CsvOutcomeTable {
    /// Load a table from a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("open outcome table {}", path.as_ref().display()),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Load a table from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = Self::default();
        for record in csv_reader.deserialize() {
            let record: OutcomeRecord = record?;
            table.insert(record)?;
        }
        Ok(table)
    }

    /// Add a single record.
    pub fn insert(&mut self, record: OutcomeRecord) -> Result<()> {
        let play: PlayCall = record.play.parse()?;
        self.rows
            .entry((record.down, record.to_go, record.position, play))
            .or_default()
            .push(RawOutcome {
                kind: record.kind,
                yards: record.yards,
                weight: record.weight,
            });
        self.records += 1;
        Ok(())
    }

    /// Number of records loaded
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Number of distinct situations covered
    pub fn situations(&self) -> usize {
        self.rows.len()
    }
}

impl OutcomeSource for CsvOutcomeTable {
    fn outcomes(&mut self, query: &OutcomeQuery) -> Result<Vec<PlayOutcome>> {
        let key = (query.down, query.to_go, query.position, query.play);
        let Some(raw) = self.rows.get(&key) else {
            return Ok(Vec::new());
        };
        raw.iter()
            .map(|row| {
                let kind: OutcomeKind = row.kind.parse()?;
                Ok(PlayOutcome::new(kind, row.yards, row.weight))
            })
            .collect()
    }
}
