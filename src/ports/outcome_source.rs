//! Outcome source port - where play results come from

use crate::{
    Result,
    football::{OutcomeQuery, PlayOutcome},
};

/// Source of weighted play outcomes
///
/// Stands in for historical play-by-play data. Given the down, distance,
/// position (measured from the opponent's goal line) and the play call,
/// returns the candidate outcomes with their relative likelihoods.
///
/// # Contract
///
/// - An empty vector means "no data for this situation" and is not an
///   error; the environment degrades to a zero-yard gain.
/// - Weights are relative and need not sum to one.
/// - Errors are reserved for broken data, such as an outcome label the
///   crate does not know ([`crate::Error::InvalidOutcome`]).
///
/// # Examples
///
/// ```
/// use playcaller::{
///     football::{OutcomeKind, OutcomeQuery, PlayOutcome},
///     ports::OutcomeSource,
/// };
///
/// struct AlwaysFive;
///
/// impl OutcomeSource for AlwaysFive {
///     fn outcomes(&mut self, _query: &OutcomeQuery) -> playcaller::Result<Vec<PlayOutcome>> {
///         Ok(vec![PlayOutcome::new(OutcomeKind::BallMoved, 5, 1.0)])
///     }
/// }
/// ```
pub trait OutcomeSource {
    /// Candidate outcomes for the given situation.
    fn outcomes(&mut self, query: &OutcomeQuery) -> Result<Vec<PlayOutcome>>;

    /// Seed any internal randomness.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for table lookups.
    fn set_rng_seed(&mut self, _seed: u64) {}
}

impl<S: OutcomeSource + ?Sized> OutcomeSource for Box<S> {
    fn outcomes(&mut self, query: &OutcomeQuery) -> Result<Vec<PlayOutcome>> {
        (**self).outcomes(query)
    }

    fn set_rng_seed(&mut self, seed: u64) {
        (**self).set_rng_seed(seed)
    }
}
