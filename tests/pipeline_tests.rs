//! Tests for the training pipeline and its observers

use std::sync::{Arc, Mutex};

use playcaller::{
    Result,
    adapters::{ScriptedSource, SyntheticSource},
    football::{OutcomeKind, PlayCall, PlayOutcome, PlaycallingEnv},
    pipeline::{
        IterationReport, JsonlObserver, MetricsObserver, Observer, ScalarRecord, TrainingConfig,
        TrainingPipeline, TrainingResult, mean_reward, random_play,
    },
    td::{TdAgent, TdConfig},
};
use rand::{SeedableRng, rngs::StdRng};

/// Observer that shares a metrics observer with the test
struct SharedMetrics(Arc<Mutex<MetricsObserver>>);

impl Observer for SharedMetrics {
    fn on_episode_end(&mut self, iteration: usize, episode: usize, reward: f64) -> Result<()> {
        self.0.lock().unwrap().on_episode_end(iteration, episode, reward)
    }

    fn on_scalar(&mut self, name: &str, value: f64, step: usize) -> Result<()> {
        self.0.lock().unwrap().on_scalar(name, value, step)
    }

    fn on_iteration_end(&mut self, report: &IterationReport) -> Result<()> {
        self.0.lock().unwrap().on_iteration_end(report)
    }
}

fn fumbling_env() -> PlaycallingEnv<ScriptedSource> {
    PlaycallingEnv::new(ScriptedSource::repeating(vec![PlayOutcome::new(
        OutcomeKind::Fumble,
        0,
        1.0,
    )]))
}

fn small_config(max_iterations: usize) -> TrainingConfig {
    TrainingConfig {
        random_steps: 25,
        test_episodes: 4,
        max_iterations,
        ..TrainingConfig::default()
    }
}

/// Test the pipeline reports every iteration to its observers
#[test]
fn test_observers_see_every_iteration() {
    let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
    let env = PlaycallingEnv::new(SyntheticSource::new());
    let mut agent = TdAgent::new(env, TdConfig::default().with_seed(42)).unwrap();
    let mut test_env = fumbling_env();

    let result = TrainingPipeline::new(small_config(4))
        .with_observer(Box::new(SharedMetrics(Arc::clone(&metrics))))
        .run(&mut agent, &mut test_env)
        .unwrap();

    assert_eq!(result.iterations, 4);
    assert!(!result.solved);

    let metrics = metrics.lock().unwrap();
    assert_eq!(metrics.reports().len(), 4);
    assert_eq!(metrics.episodes(), 16);

    let rewards = metrics.series("reward");
    assert_eq!(rewards.len(), 4);
    assert_eq!(
        rewards.iter().map(|(step, _)| *step).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    for (_, reward) in &rewards {
        assert!((reward + 5.6).abs() < 1e-9);
    }
    assert_eq!(metrics.series("best_reward").len(), 4);
}

/// Test the best reward is monotone and starts from the configured floor
#[test]
fn test_best_reward_tracking() {
    let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
    let env = PlaycallingEnv::new(SyntheticSource::new());
    let mut agent = TdAgent::new(env, TdConfig::default().with_seed(7)).unwrap();
    let mut test_env = PlaycallingEnv::new(SyntheticSource::new()).with_seed(8);

    let result = TrainingPipeline::new(small_config(6))
        .with_observer(Box::new(SharedMetrics(Arc::clone(&metrics))))
        .run(&mut agent, &mut test_env)
        .unwrap();

    let metrics = metrics.lock().unwrap();
    let best: Vec<f64> = metrics
        .series("best_reward")
        .into_iter()
        .map(|(_, value)| value)
        .collect();
    assert!(best.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(best.iter().all(|value| *value >= -7.0));

    let max_reward = result
        .rewards
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(result.best_reward, max_reward.max(-7.0));
    assert_eq!(result.rewards.len(), result.iterations);
}

/// Test JSONL observer output has one line per scalar
#[test]
fn test_jsonl_observer_with_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scalars.jsonl");

    let env = PlaycallingEnv::new(SyntheticSource::new());
    let mut agent = TdAgent::new(env, TdConfig::default().with_seed(5)).unwrap();
    let mut test_env = fumbling_env();

    TrainingPipeline::new(small_config(3))
        .with_observer(Box::new(JsonlObserver::new(&path).unwrap()))
        .run(&mut agent, &mut test_env)
        .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let records: Vec<ScalarRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 6);
    assert_eq!(records[0].name, "reward");
    assert_eq!(records[1].name, "best_reward");
    assert_eq!(records[5].step, 3);
}

/// Test training results survive a save/load through JSON
#[test]
fn test_training_result_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");

    let env = PlaycallingEnv::new(SyntheticSource::new());
    let mut agent = TdAgent::new(env, TdConfig::default().with_seed(11)).unwrap();
    let mut test_env = fumbling_env();
    let result = TrainingPipeline::new(small_config(2))
        .run(&mut agent, &mut test_env)
        .unwrap();

    result.save(&path).unwrap();
    let loaded = TrainingResult::load(&path).unwrap();
    assert_eq!(loaded.iterations, result.iterations);
    assert_eq!(loaded.rewards, result.rewards);
    assert_eq!(loaded.solved, result.solved);
}

/// Test invalid configs are rejected before any training happens
#[test]
fn test_invalid_config_is_rejected() {
    let env = PlaycallingEnv::new(SyntheticSource::new());
    let mut agent = TdAgent::new(env, TdConfig::default().with_seed(1)).unwrap();
    let mut test_env = fumbling_env();

    let config = TrainingConfig {
        max_iterations: 0,
        ..TrainingConfig::default()
    };
    assert!(TrainingPipeline::new(config)
        .run(&mut agent, &mut test_env)
        .is_err());
    assert!(agent.transitions().is_empty());
}

/// Test the random baseline against a fixed outcome model
#[test]
fn test_random_play_baseline() {
    let mut env = PlaycallingEnv::new(ScriptedSource::repeating(vec![PlayOutcome::new(
        OutcomeKind::Interception,
        0,
        1.0,
    )]));
    let mut rng = StdRng::seed_from_u64(99);

    let summaries = random_play(&mut env, 10, &mut rng).unwrap();
    assert_eq!(summaries.len(), 10);
    assert!(summaries.iter().all(|s| s.steps == 1));
    assert!((mean_reward(&summaries) + 5.6).abs() < 1e-9);

    // Each possession starts over from the kickoff
    let queries = env.source().queries();
    assert_eq!(queries.len(), 10);
    assert!(queries.iter().all(|q| q.position == 80 && q.down == 3));
    assert!(queries.iter().all(|q| PlayCall::ALL.contains(&q.play)));
}
