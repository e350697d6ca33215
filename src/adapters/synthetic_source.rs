//! Random stand-in for historical play-by-play data.

use rand::{Rng, rngs::StdRng};

use crate::{
    Result, build_rng,
    football::{OutcomeKind, OutcomeQuery, PlayCall, PlayOutcome},
    ports::OutcomeSource,
};

/// Yards added to the line of scrimmage to get the kick distance
const KICK_OFFSET: i32 = 17;
/// Spot change on a missed field goal
const MISSED_KICK_YARDS: i32 = -7;

/// Generates plausible outcome distributions without any data.
///
/// Scrimmage plays get four equally likely gains in `0..=2*to_go`, a
/// turnover and a score from the current spot. Field goals succeed less
/// often from further out; punts move the ball 35-50 yards.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    rng: StdRng,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self {
            rng: build_rng(None),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: build_rng(Some(seed)),
        }
    }

    fn scrimmage(&mut self, query: &OutcomeQuery) -> Vec<PlayOutcome> {
        let max_gain = (query.to_go * 2).max(0);
        let mut outcomes: Vec<PlayOutcome> = (0..4)
            .map(|_| {
                let yards = self.rng.random_range(0..=max_gain);
                PlayOutcome::new(OutcomeKind::BallMoved, yards, 0.2)
            })
            .collect();
        outcomes.push(PlayOutcome::new(OutcomeKind::Interception, -5, 0.05));
        outcomes.push(PlayOutcome::new(OutcomeKind::Fumble, -5, 0.05));
        outcomes.push(PlayOutcome::new(OutcomeKind::Touchdown, query.position, 0.1));
        outcomes
    }

    fn field_goal(query: &OutcomeQuery) -> Vec<PlayOutcome> {
        let distance = query.position + KICK_OFFSET;
        let make = (1.0 - f64::from(distance - 20) / 45.0).clamp(0.05, 0.95);
        vec![
            PlayOutcome::new(OutcomeKind::FieldGoalMade, 0, make),
            PlayOutcome::new(OutcomeKind::FieldGoalMissed, MISSED_KICK_YARDS, 1.0 - make),
        ]
    }

    fn punt(&mut self) -> Vec<PlayOutcome> {
        let yards = self.rng.random_range(35..=50);
        vec![PlayOutcome::new(OutcomeKind::BallMoved, yards, 1.0)]
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeSource for SyntheticSource {
    fn outcomes(&mut self, query: &OutcomeQuery) -> Result<Vec<PlayOutcome>> {
        Ok(match query.play {
            PlayCall::FieldGoal => Self::field_goal(query),
            PlayCall::Punt => self.punt(),
            PlayCall::ShortPass | PlayCall::DeepPass | PlayCall::Run | PlayCall::QbSneak => {
                self.scrimmage(query)
            }
        })
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = build_rng(Some(seed));
    }
}
