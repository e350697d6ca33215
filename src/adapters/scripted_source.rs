//! Scripted outcome source for tests and deterministic scenarios.

use std::collections::VecDeque;

use crate::{
    Result,
    football::{OutcomeQuery, PlayOutcome},
    ports::OutcomeSource,
};

/// Outcome source that replays queued outcome lists.
///
/// Each query pops the next scripted list; once the script runs out the
/// repeating list (if any) is returned, otherwise an empty list. Every query
/// is recorded so tests can check what the environment asked for.
///
/// # Examples
///
/// ```
/// use playcaller::adapters::ScriptedSource;
/// use playcaller::football::{OutcomeKind, OutcomeQuery, PlayCall, PlayOutcome};
/// use playcaller::ports::OutcomeSource;
///
/// let mut source = ScriptedSource::new()
///     .then(vec![PlayOutcome::new(OutcomeKind::Incomplete, 0, 1.0)]);
/// let query = OutcomeQuery { down: 3, to_go: 10, position: 80, play: PlayCall::DeepPass };
///
/// assert_eq!(source.outcomes(&query)?.len(), 1);
/// assert!(source.outcomes(&query)?.is_empty());
/// assert_eq!(source.queries().len(), 2);
/// # Ok::<(), playcaller::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: VecDeque<Vec<PlayOutcome>>,
    repeating: Option<Vec<PlayOutcome>>,
    queries: Vec<OutcomeQuery>,
}

impl ScriptedSource {
    /// Create an empty script; every query returns no outcomes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every query with the same outcome list.
    pub fn repeating(outcomes: Vec<PlayOutcome>) -> Self {
        Self {
            repeating: Some(outcomes),
            ..Self::default()
        }
    }

    /// Queue an outcome list for the next unanswered query.
    pub fn then(mut self, outcomes: Vec<PlayOutcome>) -> Self {
        self.script.push_back(outcomes);
        self
    }

    /// Queue a single certain outcome.
    pub fn then_outcome(self, outcome: PlayOutcome) -> Self {
        self.then(vec![outcome])
    }

    /// Queries received so far, oldest first
    pub fn queries(&self) -> &[OutcomeQuery] {
        &self.queries
    }

    /// Number of scripted lists not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl OutcomeSource for ScriptedSource {
    fn outcomes(&mut self, query: &OutcomeQuery) -> Result<Vec<PlayOutcome>> {
        self.queries.push(*query);
        if let Some(next) = self.script.pop_front() {
            return Ok(next);
        }
        Ok(self.repeating.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::football::{OutcomeKind, PlayCall};

    fn query() -> OutcomeQuery {
        OutcomeQuery {
            down: 3,
            to_go: 10,
            position: 80,
            play: PlayCall::Run,
        }
    }

    #[test]
    fn test_script_then_repeat() {
        let gain = PlayOutcome::new(OutcomeKind::BallMoved, 3, 1.0);
        let sack = PlayOutcome::new(OutcomeKind::BallMoved, -6, 1.0);
        let mut source = ScriptedSource::repeating(vec![gain]).then_outcome(sack);

        assert_eq!(source.remaining(), 1);
        assert_eq!(source.outcomes(&query()).unwrap(), vec![sack]);
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.outcomes(&query()).unwrap(), vec![gain]);
        assert_eq!(source.outcomes(&query()).unwrap(), vec![gain]);
        assert_eq!(source.queries().len(), 3);
    }

    #[test]
    fn test_empty_script() {
        let mut source = ScriptedSource::new();
        assert!(source.outcomes(&query()).unwrap().is_empty());
    }
}
