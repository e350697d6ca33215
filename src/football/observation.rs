//! Possession state as seen by the agent

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Field position bounds (yards from own goal line)
pub const FIELD_POSITION_RANGE: (i32, i32) = (0, 100);
/// Remaining downs bounds
pub const DOWNS_RANGE: (i32, i32) = (0, 4);
/// Yards-to-go bounds
pub const TO_GO_RANGE: (i32, i32) = (0, 99);

/// Full environment state, also used as the agent's state key
///
/// Two observations with the same field values are the same state. Every
/// value of this type is within bounds: outside the crate it can only be
/// built through [`Observation::new`], [`Observation::kickoff`], parsing or
/// deserialization, all of which validate.
///
/// # Examples
///
/// ```
/// use playcaller::football::Observation;
///
/// let obs: Observation = "(20,3,10,0,0,0)".parse()?;
/// assert_eq!(obs, Observation::kickoff());
/// assert_eq!(obs.to_string(), "(20,3,10,0,0,0)");
/// assert!(Observation::new(500, -9, 10, false, false, false).is_err());
/// # Ok::<(), playcaller::Error>(())
/// ```
///
/// Fields cannot be set directly:
///
/// ```compile_fail
/// use playcaller::football::Observation;
///
/// let obs = Observation {
///     field_position: 500,
///     ..Observation::kickoff()
/// };
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "ObservationFields")]
pub struct Observation {
    pub(crate) field_position: i32,
    pub(crate) remaining_downs: i32,
    pub(crate) to_go: i32,
    pub(crate) turnover: bool,
    pub(crate) touchdown: bool,
    pub(crate) field_goal: bool,
}

/// Unchecked wire form, validated on the way in
#[derive(Deserialize)]
struct ObservationFields {
    field_position: i32,
    remaining_downs: i32,
    to_go: i32,
    turnover: bool,
    touchdown: bool,
    field_goal: bool,
}

impl TryFrom<ObservationFields> for Observation {
    type Error = Error;

    fn try_from(fields: ObservationFields) -> Result<Self> {
        Observation::new(
            fields.field_position,
            fields.remaining_downs,
            fields.to_go,
            fields.turnover,
            fields.touchdown,
            fields.field_goal,
        )
    }
}

impl Observation {
    /// Build a validated observation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if any numeric field is outside its range.
    pub fn new(
        field_position: i32,
        remaining_downs: i32,
        to_go: i32,
        turnover: bool,
        touchdown: bool,
        field_goal: bool,
    ) -> Result<Self> {
        let obs = Self {
            field_position,
            remaining_downs,
            to_go,
            turnover,
            touchdown,
            field_goal,
        };
        obs.validate()?;
        Ok(obs)
    }

    /// Start of a drive: own 20, three downs left, 10 to go
    pub const fn kickoff() -> Self {
        Self {
            field_position: 20,
            remaining_downs: 3,
            to_go: 10,
            turnover: false,
            touchdown: false,
            field_goal: false,
        }
    }

    /// Check every field against its declared range.
    pub fn validate(&self) -> Result<()> {
        check_range("field_position", self.field_position, FIELD_POSITION_RANGE)?;
        check_range("remaining_downs", self.remaining_downs, DOWNS_RANGE)?;
        check_range("to_go", self.to_go, TO_GO_RANGE)?;
        Ok(())
    }

    /// Yards from own goal line
    pub fn field_position(&self) -> i32 {
        self.field_position
    }

    pub fn remaining_downs(&self) -> i32 {
        self.remaining_downs
    }

    /// Yards needed for a first down
    pub fn to_go(&self) -> i32 {
        self.to_go
    }

    pub fn turnover(&self) -> bool {
        self.turnover
    }

    pub fn touchdown(&self) -> bool {
        self.touchdown
    }

    pub fn field_goal(&self) -> bool {
        self.field_goal
    }

    /// Whether one of the terminal flags is raised
    pub fn has_terminal_flag(&self) -> bool {
        self.turnover || self.touchdown || self.field_goal
    }

    /// Tuple form with flags as 0/1
    pub fn as_tuple(&self) -> (i32, i32, i32, u8, u8, u8) {
        (
            self.field_position,
            self.remaining_downs,
            self.to_go,
            u8::from(self.turnover),
            u8::from(self.touchdown),
            u8::from(self.field_goal),
        )
    }

    /// Clamp numeric fields into their declared ranges.
    pub(crate) fn clamped(mut self) -> Self {
        self.field_position = self
            .field_position
            .clamp(FIELD_POSITION_RANGE.0, FIELD_POSITION_RANGE.1);
        self.remaining_downs = self.remaining_downs.clamp(DOWNS_RANGE.0, DOWNS_RANGE.1);
        self.to_go = self.to_go.clamp(TO_GO_RANGE.0, TO_GO_RANGE.1);
        self
    }
}

impl Default for Observation {
    fn default() -> Self {
        Self::kickoff()
    }
}

fn check_range(field: &'static str, value: i32, (min, max): (i32, i32)) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfBounds {
            field,
            value,
            min,
            max,
        })
    }
}

fn parse_flag(token: &str, name: &str, input: &str) -> Result<bool> {
    match token {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(Error::InvalidState {
            message: format!("{name} flag must be 0 or 1, got '{other}' in '{input}'"),
        }),
    }
}

impl FromStr for Observation {
    type Err = Error;

    /// Parse `fp,downs,to_go,turnover,touchdown,field_goal`, optionally parenthesized
    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let tokens: Vec<&str> = inner.split(',').map(str::trim).collect();
        if tokens.len() != 6 {
            return Err(Error::InvalidState {
                message: format!("expected 6 comma-separated fields, got {} in '{s}'", tokens.len()),
            });
        }

        let number = |idx: usize, name: &str| -> Result<i32> {
            tokens[idx].parse::<i32>().map_err(|_| Error::InvalidState {
                message: format!("{name} must be an integer, got '{}' in '{s}'", tokens[idx]),
            })
        };

        Observation::new(
            number(0, "field_position")?,
            number(1, "remaining_downs")?,
            number(2, "to_go")?,
            parse_flag(tokens[3], "turnover", s)?,
            parse_flag(tokens[4], "touchdown", s)?,
            parse_flag(tokens[5], "field_goal", s)?,
        )
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fp, downs, to_go, to, td, fg) = self.as_tuple();
        write!(f, "({fp},{downs},{to_go},{to},{td},{fg})")
    }
}
