//! Play outcomes and weighted outcome sampling

use std::{fmt, str::FromStr};

use rand::{Rng, distr::weighted::Error as WeightError, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::PlayCall;
use crate::Error;

/// What happened on a play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    BallMoved,
    Incomplete,
    Interception,
    Fumble,
    Touchdown,
    FieldGoalMade,
    FieldGoalMissed,
}

impl OutcomeKind {
    pub fn label(self) -> &'static str {
        match self {
            OutcomeKind::BallMoved => "BALL_MOVED",
            OutcomeKind::Incomplete => "INCOMPLETE",
            OutcomeKind::Interception => "INTERCEPTION",
            OutcomeKind::Fumble => "FUMBLE",
            OutcomeKind::Touchdown => "TOUCHDOWN",
            OutcomeKind::FieldGoalMade => "FIELD_GOAL_MADE",
            OutcomeKind::FieldGoalMissed => "FIELD_GOAL_MISSED",
        }
    }
}

impl FromStr for OutcomeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BALL_MOVED" => Ok(OutcomeKind::BallMoved),
            "INCOMPLETE" => Ok(OutcomeKind::Incomplete),
            "INTERCEPTION" => Ok(OutcomeKind::Interception),
            "FUMBLE" => Ok(OutcomeKind::Fumble),
            "TOUCHDOWN" => Ok(OutcomeKind::Touchdown),
            "FIELD_GOAL_MADE" => Ok(OutcomeKind::FieldGoalMade),
            "FIELD_GOAL_MISSED" => Ok(OutcomeKind::FieldGoalMissed),
            _ => Err(Error::InvalidOutcome {
                kind: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One candidate result of a play with its relative likelihood
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayOutcome {
    pub kind: OutcomeKind,
    /// Signed yardage; negative for losses
    pub yards: i32,
    /// Sampling weight, need not be normalized
    pub weight: f64,
}

impl PlayOutcome {
    pub fn new(kind: OutcomeKind, yards: i32, weight: f64) -> Self {
        Self { kind, yards, weight }
    }

    /// Zero-yard gain with certainty, used when no outcome can be sampled
    pub const fn no_data() -> Self {
        Self {
            kind: OutcomeKind::BallMoved,
            yards: 0,
            weight: 1.0,
        }
    }
}

/// Lookup key handed to an outcome source
///
/// `position` is measured from the opponent's goal line, the mirror of
/// [`super::Observation::field_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutcomeQuery {
    pub down: i32,
    pub to_go: i32,
    pub position: i32,
    pub play: PlayCall,
}

/// Why sampling fell back to [`PlayOutcome::no_data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The source had no outcomes for the query
    NoOutcomes,
    /// Weights were all zero, negative or not finite
    UnusableWeights,
}

/// Result of drawing one outcome from a candidate list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutcomeDraw {
    Sampled(PlayOutcome),
    Fallback(FallbackReason),
}

impl OutcomeDraw {
    /// Draw one outcome proportionally to its weight.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, outcomes: &[PlayOutcome]) -> Self {
        match outcomes.choose_weighted(rng, |o| o.weight) {
            Ok(outcome) => OutcomeDraw::Sampled(*outcome),
            Err(WeightError::InvalidInput) if outcomes.is_empty() => {
                OutcomeDraw::Fallback(FallbackReason::NoOutcomes)
            }
            Err(_) => OutcomeDraw::Fallback(FallbackReason::UnusableWeights),
        }
    }

    /// The outcome to apply, substituting the zero-yard default on fallback
    pub fn outcome(&self) -> PlayOutcome {
        match self {
            OutcomeDraw::Sampled(outcome) => *outcome,
            OutcomeDraw::Fallback(_) => PlayOutcome::no_data(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, OutcomeDraw::Fallback(_))
    }
}
