//! Play-calling environment with a reset/step contract

use std::{collections::HashMap, fmt};

use log::{debug, warn};
use rand::rngs::StdRng;

use super::{Observation, OutcomeDraw, OutcomeKind, OutcomeQuery, PlayCall, PlayOutcome};
use crate::{Error, Result, build_rng, ports::OutcomeSource};

/// Points conceded (scaled by field position) when the offense gives the ball up
pub const TURNOVER_PENALTY: f64 = 7.0;
/// Reward for a touchdown
pub const TOUCHDOWN_REWARD: f64 = 7.0;
/// Reward for a made field goal
pub const FIELD_GOAL_REWARD: f64 = 3.0;

/// Result of one environment step
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    /// Free-form metadata; currently always empty
    pub info: HashMap<String, String>,
}

/// A single offensive possession driven one play call at a time
///
/// # Examples
///
/// ```
/// use playcaller::{
///     adapters::ScriptedSource,
///     football::{OutcomeKind, PlayCall, PlayOutcome, PlaycallingEnv},
/// };
///
/// let source = ScriptedSource::repeating(vec![PlayOutcome::new(OutcomeKind::BallMoved, 15, 1.0)]);
/// let mut env = PlaycallingEnv::new(source).with_seed(7);
/// env.reset();
///
/// let step = env.step(PlayCall::Run)?;
/// assert_eq!(step.observation.as_tuple(), (35, 3, 10, 0, 0, 0));
/// assert!(!step.done);
/// # Ok::<(), playcaller::Error>(())
/// ```
pub struct PlaycallingEnv<S> {
    source: S,
    state: Observation,
    done: bool,
    last_draw: Option<OutcomeDraw>,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl<S: OutcomeSource> PlaycallingEnv<S> {
    /// Create an environment positioned at the default kickoff state.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Observation::kickoff(),
            done: false,
            last_draw: None,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Seed outcome sampling (and the source's own randomness).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = build_rng(Some(seed));
        self.rng_seed = Some(seed);
        self.source.set_rng_seed(seed.wrapping_add(1));
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Start a new possession at the default state (own 20, 3 downs, 10 to go).
    pub fn reset(&mut self) -> Observation {
        self.state = Observation::kickoff();
        self.done = false;
        self.last_draw = None;
        self.state
    }

    /// Start a new possession from an explicit scenario.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the scenario is not a valid observation.
    pub fn reset_to(&mut self, scenario: Observation) -> Result<Observation> {
        scenario.validate()?;
        self.state = scenario;
        self.done = false;
        self.last_draw = None;
        Ok(self.state)
    }

    /// Current observation
    pub fn observation(&self) -> Observation {
        self.state
    }

    /// Whether the current possession has ended
    pub fn is_terminal(&self) -> bool {
        self.done || self.state.has_terminal_flag()
    }

    /// The most recent outcome draw, if a step has been taken since reset
    pub fn last_draw(&self) -> Option<OutcomeDraw> {
        self.last_draw
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Call a play and advance the possession.
    ///
    /// # Errors
    ///
    /// - [`Error::EpisodeOver`] if the possession already ended
    /// - Any error reported by the outcome source, e.g. [`Error::InvalidOutcome`]
    pub fn step(&mut self, action: PlayCall) -> Result<Step> {
        if self.is_terminal() {
            return Err(Error::EpisodeOver);
        }

        let query = OutcomeQuery {
            down: self.state.remaining_downs,
            to_go: self.state.to_go,
            position: 100 - self.state.field_position,
            play: action,
        };
        let outcomes = self.source.outcomes(&query)?;
        let draw = OutcomeDraw::sample(&mut self.rng, &outcomes);
        if let OutcomeDraw::Fallback(reason) = draw {
            warn!("no usable outcomes for {query:?} ({reason:?}); assuming no gain");
        }
        let outcome = draw.outcome();

        let observation = apply_outcome(self.state, action, &outcome);
        let (reward, done) = assess(&observation);

        debug!(
            "{action} from {} drew {} {:+} -> {observation} reward={reward:.3} done={done}",
            self.state, outcome.kind, outcome.yards
        );

        self.state = observation;
        self.done = done;
        self.last_draw = Some(draw);

        Ok(Step {
            observation,
            reward,
            done,
            info: HashMap::new(),
        })
    }

    /// Human-readable summary of the current possession
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<S> fmt::Display for PlaycallingEnv<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current Field Position: {}", self.state.field_position)?;
        write!(f, "Remaining Downs: {}", self.state.remaining_downs)
    }
}

/// Apply a sampled outcome to a state.
///
/// After the kind-specific update, remaining downs are decremented once more
/// regardless of kind, so an incomplete pass costs two downs and a first down
/// lands on 3 rather than 4. Yardage saturates instead of overflowing, and
/// fields are finally clamped into their ranges.
pub fn apply_outcome(state: Observation, action: PlayCall, outcome: &PlayOutcome) -> Observation {
    let mut next = state;
    match outcome.kind {
        OutcomeKind::Incomplete => {
            if next.remaining_downs >= 1 {
                next.remaining_downs -= 1;
            } else {
                next.turnover = true;
            }
        }
        OutcomeKind::BallMoved => {
            next.field_position = next.field_position.saturating_add(outcome.yards);
            if action == PlayCall::Punt {
                next.turnover = true;
            } else if next.field_position >= 100 {
                next.field_position = 100;
                next.touchdown = true;
            } else if outcome.yards >= next.to_go {
                next.remaining_downs = 4;
                next.to_go = if next.field_position >= 90 {
                    100 - next.field_position
                } else {
                    10
                };
            } else {
                next.to_go = next.to_go.saturating_sub(outcome.yards);
            }
        }
        OutcomeKind::Interception | OutcomeKind::Fumble | OutcomeKind::FieldGoalMissed => {
            next.turnover = true;
            next.field_position = next.field_position.saturating_add(outcome.yards);
        }
        OutcomeKind::Touchdown => {
            next.field_position = 100;
            next.touchdown = true;
        }
        OutcomeKind::FieldGoalMade => {
            next.field_goal = true;
        }
    }
    next.remaining_downs -= 1;
    next.clamped()
}

/// Reward and termination for a post-step observation.
///
/// Rules are checked in order: out of downs or turnover, touchdown, field goal.
pub fn assess(observation: &Observation) -> (f64, bool) {
    if observation.remaining_downs <= 0 || observation.turnover {
        let reward = -TURNOVER_PENALTY * (1.0 - f64::from(observation.field_position) / 100.0);
        (reward, true)
    } else if observation.touchdown {
        (TOUCHDOWN_REWARD, true)
    } else if observation.field_goal {
        (FIELD_GOAL_REWARD, true)
    } else {
        (0.0, false)
    }
}
