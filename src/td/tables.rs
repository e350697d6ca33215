//! Empirical model and value tables for tabular TD learning

use std::collections::{HashMap, HashSet};

use crate::football::{Observation, PlayCall};

/// Observed successor counts per (state, action)
///
/// Successors are kept in the order they were first observed, and states
/// are listed in the order they were first left.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    counts: HashMap<(Observation, PlayCall), Vec<(Observation, u32)>>,
    states: Vec<Observation>,
    seen: HashSet<Observation>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one observed transition.
    pub fn record(&mut self, state: Observation, action: PlayCall, next_state: Observation) {
        if self.seen.insert(state) {
            self.states.push(state);
        }

        let successors = self.counts.entry((state, action)).or_default();
        match successors.iter_mut().find(|(s, _)| *s == next_state) {
            Some((_, count)) => *count += 1,
            None => successors.push((next_state, 1)),
        }
    }

    /// Successors of (state, action) with their counts, in first-seen order
    pub fn successors(&self, state: &Observation, action: PlayCall) -> &[(Observation, u32)] {
        self.counts
            .get(&(*state, action))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Count for a specific transition
    pub fn count(&self, state: &Observation, action: PlayCall, next_state: &Observation) -> u32 {
        self.successors(state, action)
            .iter()
            .find(|(s, _)| s == next_state)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// States with at least one recorded transition, in first-visit order
    pub fn states(&self) -> &[Observation] {
        &self.states
    }

    /// Number of distinct (state, action) pairs recorded
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total transitions counted
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .flat_map(|successors| successors.iter().map(|(_, c)| u64::from(*c)))
            .sum()
    }
}

/// Last observed reward per (state, action, next state)
#[derive(Debug, Clone, Default)]
pub struct RewardTable {
    rewards: HashMap<(Observation, PlayCall, Observation), f64>,
}

impl RewardTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a reward, replacing any previous value for the same triple.
    pub fn record(
        &mut self,
        state: Observation,
        action: PlayCall,
        next_state: Observation,
        reward: f64,
    ) {
        self.rewards.insert((state, action, next_state), reward);
    }

    /// Reward for a triple; 0.0 when never observed
    pub fn get(&self, state: &Observation, action: PlayCall, next_state: &Observation) -> f64 {
        self.rewards
            .get(&(*state, action, *next_state))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}

/// State values V(s) and the action values Q(s,a) they were maximized from
///
/// Missing entries read as 0.0.
#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    state_values: HashMap<Observation, f64>,
    action_values: HashMap<(Observation, PlayCall), f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_value(&self, state: &Observation) -> f64 {
        self.state_values.get(state).copied().unwrap_or(0.0)
    }

    pub fn set_state_value(&mut self, state: Observation, value: f64) {
        self.state_values.insert(state, value);
    }

    pub fn action_value(&self, state: &Observation, action: PlayCall) -> f64 {
        self.action_values
            .get(&(*state, action))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set_action_value(&mut self, state: Observation, action: PlayCall, value: f64) {
        self.action_values.insert((state, action), value);
    }

    /// Action values for every play in a state, in index order
    pub fn action_values(&self, state: &Observation) -> Vec<(PlayCall, f64)> {
        PlayCall::ALL
            .iter()
            .map(|&action| (action, self.action_value(state, action)))
            .collect()
    }

    /// Number of states with a stored value
    pub fn len(&self) -> usize {
        self.state_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state_values.is_empty()
    }
}
