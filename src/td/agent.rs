//! Tabular TD agent driven by an empirical transition model
//!
//! The agent explores with random play calls, recording every observed
//! transition and reward. Value iteration then bootstraps action values
//! from those records, and the greedy policy picks the best action value.

use log::{debug, info};
use rand::rngs::StdRng;

use super::{
    config::TdConfig,
    tables::{RewardTable, TransitionTable, ValueTable},
};
use crate::{
    Result, build_rng,
    football::{Observation, PlayCall, PlaycallingEnv, Step},
    ports::OutcomeSource,
};

/// TD agent owning its exploration environment and learned tables
///
/// # Examples
///
/// ```
/// use playcaller::{
///     adapters::SyntheticSource,
///     football::{Observation, PlaycallingEnv},
///     td::{TdAgent, TdConfig},
/// };
///
/// let env = PlaycallingEnv::new(SyntheticSource::new());
/// let mut agent = TdAgent::new(env, TdConfig::default().with_seed(7))?;
///
/// agent.play_n_random_steps(200)?;
/// agent.value_iteration();
/// let play = agent.select_action(&Observation::kickoff());
/// # let _ = play;
/// # Ok::<(), playcaller::Error>(())
/// ```
pub struct TdAgent<S> {
    env: PlaycallingEnv<S>,
    state: Observation,
    transitions: TransitionTable,
    rewards: RewardTable,
    values: ValueTable,
    config: TdConfig,
    rng: StdRng,
}

impl<S: OutcomeSource> TdAgent<S> {
    /// Create an agent around an exploration environment.
    ///
    /// The environment is reset, and seeded when the config carries a seed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the config is invalid.
    pub fn new(mut env: PlaycallingEnv<S>, config: TdConfig) -> Result<Self> {
        config.validate()?;
        if let Some(seed) = config.seed {
            env.set_rng_seed(seed.wrapping_add(1));
        }
        let state = env.reset();
        Ok(Self {
            env,
            state,
            transitions: TransitionTable::new(),
            rewards: RewardTable::new(),
            values: ValueTable::new(),
            config,
            rng: build_rng(config.seed),
        })
    }

    /// Reseed exploration and the exploration environment.
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = build_rng(Some(seed));
        self.env.set_rng_seed(seed.wrapping_add(1));
        self.config.seed = Some(seed);
    }

    /// Explore for `count` steps with uniformly random play calls.
    ///
    /// Every step is recorded in the transition and reward tables. The
    /// environment is reset whenever a possession ends.
    pub fn play_n_random_steps(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            let action = PlayCall::sample(&mut self.rng);
            let step = self.env.step(action)?;
            self.record_step(self.state, action, &step);
            self.state = if step.done {
                self.env.reset()
            } else {
                step.observation
            };
        }
        Ok(())
    }

    /// Estimate the value of calling `action` in `state`.
    ///
    /// Makes a single pass over the recorded successors in first-seen order,
    /// moving the estimate by α toward `reward + γ·V(successor)` each time.
    /// Successor counts are not used as weights, so the result depends on
    /// the order successors were first observed.
    pub fn calc_action_value(&self, state: &Observation, action: PlayCall) -> f64 {
        let mut action_value = 0.0;
        for (next_state, _count) in self.transitions.successors(state, action) {
            let reward = self.rewards.get(state, action, next_state);
            let delta =
                reward + self.config.gamma * self.values.state_value(next_state) - action_value;
            action_value += self.config.alpha * delta;
        }
        action_value
    }

    /// Greedy play call for a state.
    ///
    /// Scans plays in index order and keeps the first strictly better
    /// action value, so ties and unseen states resolve to the lowest index.
    pub fn select_action(&self, state: &Observation) -> PlayCall {
        let mut best_action = PlayCall::ALL[0];
        let mut best_value = self.values.action_value(state, best_action);
        for &action in &PlayCall::ALL[1..] {
            let value = self.values.action_value(state, action);
            if best_value < value {
                best_value = value;
                best_action = action;
            }
        }
        best_action
    }

    /// Play one greedy possession on `env` and return its total reward.
    ///
    /// Transitions are recorded exactly as during exploration.
    pub fn play_episode<T: OutcomeSource>(&mut self, env: &mut PlaycallingEnv<T>) -> Result<f64> {
        let mut total_reward = 0.0;
        let mut state = env.reset();
        loop {
            let action = self.select_action(&state);
            let step = env.step(action)?;
            self.record_step(state, action, &step);
            total_reward += step.reward;
            if step.done {
                break;
            }
            state = step.observation;
        }
        Ok(total_reward)
    }

    /// Refresh values for every state with recorded transitions.
    ///
    /// Stores Q(s,a) from [`Self::calc_action_value`] for every play and
    /// sets V(s) to the maximum. States are visited in first-visit order and
    /// updated in place, so later states see earlier updates.
    pub fn value_iteration(&mut self) {
        let states = self.transitions.states().to_vec();
        for state in states {
            let mut best = f64::NEG_INFINITY;
            for action in PlayCall::ALL {
                let value = self.calc_action_value(&state, action);
                self.values.set_action_value(state, action, value);
                best = best.max(value);
            }
            self.values.set_state_value(state, best);
        }
        debug!("value iteration refreshed {} states", self.values.len());
    }

    /// Report the greedy play call for a state.
    pub fn evaluate(&self, state: &Observation) -> PlayCall {
        let action = self.select_action(state);
        info!("for state {state}, action is {action}");
        action
    }

    /// Record a transition observed outside the agent's own rollouts.
    pub fn record_transition(
        &mut self,
        state: Observation,
        action: PlayCall,
        next_state: Observation,
        reward: f64,
    ) {
        self.rewards.record(state, action, next_state, reward);
        self.transitions.record(state, action, next_state);
    }

    fn record_step(&mut self, state: Observation, action: PlayCall, step: &Step) {
        self.record_transition(state, action, step.observation, step.reward);
    }

    pub fn config(&self) -> &TdConfig {
        &self.config
    }

    /// Current exploration state
    pub fn state(&self) -> Observation {
        self.state
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn rewards(&self) -> &RewardTable {
        &self.rewards
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut ValueTable {
        &mut self.values
    }

    pub fn env(&self) -> &PlaycallingEnv<S> {
        &self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::{ScriptedSource, SyntheticSource},
        football::{OutcomeKind, PlayOutcome},
    };

    fn obs(fp: i32, downs: i32) -> Observation {
        Observation::new(fp, downs, 10, false, false, false).unwrap()
    }

    fn scripted_agent(outcomes: Vec<PlayOutcome>) -> TdAgent<ScriptedSource> {
        let env = PlaycallingEnv::new(ScriptedSource::repeating(outcomes));
        TdAgent::new(env, TdConfig::default().with_seed(1)).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let env = PlaycallingEnv::new(ScriptedSource::new());
        assert!(TdAgent::new(env, TdConfig::default().with_gamma(2.0)).is_err());
    }

    #[test]
    fn test_calc_action_value_single_pass() {
        let mut agent = scripted_agent(Vec::new());
        let s = obs(20, 3);
        let gain = obs(25, 2);
        let lost = Observation {
            turnover: true,
            ..obs(20, 2)
        };
        agent.record_transition(s, PlayCall::Run, gain, 0.0);
        agent.record_transition(s, PlayCall::Run, lost, -5.6);

        // q = 0 + 0.05 * (0 - 0) = 0, then q = 0 + 0.05 * (-5.6 - 0) = -0.28
        let q = agent.calc_action_value(&s, PlayCall::Run);
        assert!((q + 0.28).abs() < 1e-12);
        assert_eq!(agent.calc_action_value(&s, PlayCall::Punt), 0.0);
    }

    #[test]
    fn test_calc_action_value_depends_on_successor_order() {
        let mut agent = scripted_agent(Vec::new());
        let s = obs(20, 3);
        let gain = obs(25, 2);
        let lost = Observation {
            turnover: true,
            ..obs(20, 2)
        };
        agent.record_transition(s, PlayCall::Run, lost, -5.6);
        agent.record_transition(s, PlayCall::Run, gain, 0.0);

        // q = -0.28, then q = -0.28 + 0.05 * (0 + 0.28) = -0.266
        let q = agent.calc_action_value(&s, PlayCall::Run);
        assert!((q + 0.266).abs() < 1e-12);
    }

    #[test]
    fn test_calc_action_value_bootstraps_successor_value() {
        let mut agent = scripted_agent(Vec::new());
        let s = obs(20, 3);
        let next = obs(35, 3);
        agent.record_transition(s, PlayCall::DeepPass, next, 0.0);
        agent.values_mut().set_state_value(next, 2.0);

        // 0.05 * (0 + 0.95 * 2.0) = 0.095
        let q = agent.calc_action_value(&s, PlayCall::DeepPass);
        assert!((q - 0.095).abs() < 1e-12);
    }

    #[test]
    fn test_select_action_defaults_to_first_play() {
        let agent = scripted_agent(Vec::new());
        assert_eq!(agent.select_action(&obs(50, 1)), PlayCall::ShortPass);
    }

    #[test]
    fn test_select_action_prefers_lowest_index_on_tie() {
        let mut agent = scripted_agent(Vec::new());
        let s = obs(50, 2);
        agent.values_mut().set_action_value(s, PlayCall::Punt, 1.0);
        agent.values_mut().set_action_value(s, PlayCall::DeepPass, 1.0);
        agent.values_mut().set_action_value(s, PlayCall::Run, 0.5);
        assert_eq!(agent.select_action(&s), PlayCall::DeepPass);
    }

    #[test]
    fn test_select_action_keeps_zero_over_negative() {
        let mut agent = scripted_agent(Vec::new());
        let s = obs(50, 2);
        agent.values_mut().set_action_value(s, PlayCall::ShortPass, -1.0);
        agent.values_mut().set_action_value(s, PlayCall::Run, -0.5);
        assert_eq!(agent.select_action(&s), PlayCall::DeepPass);
    }

    #[test]
    fn test_random_steps_record_transitions() {
        let mut agent = scripted_agent(vec![PlayOutcome::new(OutcomeKind::BallMoved, 2, 1.0)]);
        agent.play_n_random_steps(30).unwrap();

        assert_eq!(agent.transitions().total(), 30);
        assert!(agent.rewards().len() > 0);
        assert_eq!(agent.transitions().states()[0], Observation::kickoff());
    }

    #[test]
    fn test_random_steps_reset_after_done() {
        // Every play is a fumble, so every step ends the possession.
        let mut agent = scripted_agent(vec![PlayOutcome::new(OutcomeKind::Fumble, 0, 1.0)]);
        agent.play_n_random_steps(12).unwrap();

        assert_eq!(agent.state(), Observation::kickoff());
        assert_eq!(agent.transitions().states(), &[Observation::kickoff()]);
    }

    #[test]
    fn test_value_iteration_sets_max_over_actions() {
        let mut agent = scripted_agent(Vec::new());
        let s = obs(60, 2);
        let scored = Observation {
            field_goal: true,
            ..obs(60, 1)
        };
        agent.record_transition(s, PlayCall::FieldGoal, scored, 3.0);
        agent.value_iteration();

        let q = agent.values().action_value(&s, PlayCall::FieldGoal);
        assert!((q - 0.15).abs() < 1e-12);
        assert!((agent.values().state_value(&s) - 0.15).abs() < 1e-12);
        assert_eq!(agent.select_action(&s), PlayCall::FieldGoal);
    }

    #[test]
    fn test_value_iteration_never_negative_max() {
        // Untried plays read as 0.0, so V(s) never drops below zero.
        let mut agent = scripted_agent(Vec::new());
        let s = obs(30, 1);
        let lost = Observation {
            turnover: true,
            ..obs(30, 0)
        };
        agent.record_transition(s, PlayCall::Run, lost, -4.9);
        agent.value_iteration();

        assert!(agent.values().action_value(&s, PlayCall::Run) < 0.0);
        assert_eq!(agent.values().state_value(&s), 0.0);
        assert_eq!(agent.select_action(&s), PlayCall::ShortPass);
    }

    #[test]
    fn test_play_episode_returns_total_reward() {
        let mut agent = scripted_agent(Vec::new());
        let source = ScriptedSource::repeating(vec![PlayOutcome::new(OutcomeKind::Touchdown, 80, 1.0)]);
        let mut test_env = PlaycallingEnv::new(source).with_seed(2);

        let reward = agent.play_episode(&mut test_env).unwrap();
        assert_eq!(reward, 7.0);
        assert_eq!(
            agent
                .transitions()
                .count(&Observation::kickoff(), PlayCall::ShortPass, &test_env.observation()),
            1
        );
    }

    #[test]
    fn test_seeded_agents_learn_identically() {
        let run = || {
            let env = PlaycallingEnv::new(SyntheticSource::new());
            let mut agent = TdAgent::new(env, TdConfig::default().with_seed(99)).unwrap();
            agent.play_n_random_steps(300).unwrap();
            agent.value_iteration();
            (
                agent.transitions().total(),
                agent.transitions().states().to_vec(),
                agent.values().state_value(&Observation::kickoff()),
            )
        };
        assert_eq!(run(), run());
    }
}
