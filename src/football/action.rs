//! Play calls available to the offense

use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A play the offense can call
///
/// The discriminant doubles as the action index used by the agent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayCall {
    ShortPass = 0,
    DeepPass = 1,
    Run = 2,
    QbSneak = 3,
    FieldGoal = 4,
    Punt = 5,
}

impl PlayCall {
    /// Every play call, ordered by index
    pub const ALL: [PlayCall; 6] = [
        PlayCall::ShortPass,
        PlayCall::DeepPass,
        PlayCall::Run,
        PlayCall::QbSneak,
        PlayCall::FieldGoal,
        PlayCall::Punt,
    ];

    /// Size of the action space
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    /// Upper-case name as it appears in play-by-play data
    pub fn name(self) -> &'static str {
        match self {
            PlayCall::ShortPass => "SHORT_PASS",
            PlayCall::DeepPass => "DEEP_PASS",
            PlayCall::Run => "RUN",
            PlayCall::QbSneak => "QB_SNEAK",
            PlayCall::FieldGoal => "FIELD_GOAL",
            PlayCall::Punt => "PUNT",
        }
    }

    /// Whether the play hands the ball to the kicking unit
    pub fn is_kick(self) -> bool {
        matches!(self, PlayCall::FieldGoal | PlayCall::Punt)
    }

    /// Sample a play call uniformly at random
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> PlayCall {
        Self::ALL[rng.random_range(0..Self::COUNT)]
    }
}

impl TryFrom<usize> for PlayCall {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| Error::InvalidAction {
                value: index.to_string(),
            })
    }
}

impl From<PlayCall> for usize {
    fn from(play: PlayCall) -> Self {
        play.index()
    }
}

impl FromStr for PlayCall {
    type Err = Error;

    /// Accepts an action index or a play name (`deep_pass`, `DEEPPASS`, `deep-pass`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return PlayCall::try_from(index);
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "SHORTPASS" => Ok(PlayCall::ShortPass),
            "DEEPPASS" => Ok(PlayCall::DeepPass),
            "RUN" => Ok(PlayCall::Run),
            "QBSNEAK" => Ok(PlayCall::QbSneak),
            "FIELDGOAL" => Ok(PlayCall::FieldGoal),
            "PUNT" => Ok(PlayCall::Punt),
            _ => Err(Error::InvalidAction {
                value: trimmed.to_string(),
            }),
        }
    }
}

impl fmt::Display for PlayCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for (i, play) in PlayCall::ALL.iter().enumerate() {
            assert_eq!(play.index(), i);
            assert_eq!(PlayCall::try_from(i).unwrap(), *play);
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let err = PlayCall::try_from(6).unwrap_err();
        assert!(matches!(err, Error::InvalidAction { .. }));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("deep_pass".parse::<PlayCall>().unwrap(), PlayCall::DeepPass);
        assert_eq!("QB-SNEAK".parse::<PlayCall>().unwrap(), PlayCall::QbSneak);
        assert_eq!("SHORTPASS".parse::<PlayCall>().unwrap(), PlayCall::ShortPass);
        assert_eq!("5".parse::<PlayCall>().unwrap(), PlayCall::Punt);
        assert!("hail_mary".parse::<PlayCall>().is_err());
        assert!("9".parse::<PlayCall>().is_err());
    }

    #[test]
    fn test_sample_covers_all_plays() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; PlayCall::COUNT];
        for _ in 0..500 {
            seen[PlayCall::sample(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
