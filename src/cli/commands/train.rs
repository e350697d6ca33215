//! Train command - Learn a play-calling policy with the TD agent

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{ArgAction, Parser};

use super::open_outcome_source;
use crate::{
    cli::output::{
        format_number, format_reward, print_section, print_state_value, print_stats_table,
        print_subsection,
    },
    football::{Observation, PlaycallingEnv},
    pipeline::{JsonlObserver, ProgressObserver, TrainingConfig, TrainingPipeline},
    td::{TdAgent, TdConfig},
};

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Trailing separator or no file name: write inside that directory.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train the TD play caller", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Random exploration steps per iteration
    #[arg(long, short = 'n', default_value_t = 100)]
    pub random_steps: usize,

    /// Greedy episodes averaged per evaluation
    #[arg(long, short = 'e', default_value_t = 80)]
    pub test_episodes: usize,

    /// Average reward above which training stops
    #[arg(long, default_value_t = 3.0)]
    pub solved_reward: f64,

    /// Iteration cap
    #[arg(long, short = 'i', default_value_t = 100)]
    pub max_iterations: usize,

    /// Discount rate
    #[arg(long, default_value_t = TdConfig::DEFAULT_GAMMA)]
    pub gamma: f64,

    /// Learning rate
    #[arg(long, default_value_t = TdConfig::DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// CSV outcome table (down,to_go,position,play,kind,yards,weight);
    /// synthetic outcomes are used when omitted
    #[arg(long)]
    pub outcomes: Option<PathBuf>,

    /// Optional file for JSONL scalar metrics
    #[arg(long)]
    pub metrics: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub progress: bool,

    /// States whose learned play call is printed after training
    #[arg(
        long = "evaluate",
        value_name = "STATE",
        default_values = ["(50,1,15,0,0,0)", "(98,3,2,0,0,0)", "(30,0,10,0,0,0)"]
    )]
    pub evaluate: Vec<Observation>,
}

impl TrainArgs {
    fn td_config(&self) -> TdConfig {
        let config = TdConfig::default()
            .with_gamma(self.gamma)
            .with_alpha(self.alpha);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            random_steps: self.random_steps,
            test_episodes: self.test_episodes,
            solved_reward: self.solved_reward,
            max_iterations: self.max_iterations,
            ..TrainingConfig::default()
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let td_config = args.td_config();
    td_config.validate()?;
    let training_config = args.training_config();
    training_config.validate()?;

    let explore_env = PlaycallingEnv::new(open_outcome_source(args.outcomes.as_deref())?);
    let mut test_env = PlaycallingEnv::new(open_outcome_source(args.outcomes.as_deref())?);
    if let Some(seed) = args.seed {
        test_env.set_rng_seed(seed.wrapping_add(3));
    }

    let mut agent = TdAgent::new(explore_env, td_config)?;

    let mut pipeline = TrainingPipeline::new(training_config);
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.metrics {
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    print_section("Training TD play caller");
    print_stats_table(&[
        ("Gamma", format!("{}", td_config.gamma)),
        ("Alpha", format!("{}", td_config.alpha)),
        ("Random steps", format_number(args.random_steps)),
        ("Test episodes", format_number(args.test_episodes)),
        ("Solved reward", format_reward(args.solved_reward)),
        ("Max iterations", format_number(args.max_iterations)),
        (
            "Outcomes",
            args.outcomes
                .as_ref()
                .map_or_else(|| "synthetic".to_string(), |p| p.display().to_string()),
        ),
    ]);

    let result = pipeline.run(&mut agent, &mut test_env)?;

    print_subsection("Results");
    print_stats_table(&[
        ("Iterations", format_number(result.iterations)),
        ("Solved", result.solved.to_string()),
        ("Best reward", format_reward(result.best_reward)),
        ("Last reward", format_reward(result.last_reward)),
        ("States seen", format_number(result.states_seen)),
        ("Transitions", format_number(agent.transitions().total() as usize)),
    ]);

    if !args.evaluate.is_empty() {
        print_subsection("Learned play calls");
        for state in &args.evaluate {
            let call = agent.evaluate(state);
            print_state_value(state, agent.values().state_value(state), call.name());
        }
    }

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if path != *raw {
            println!("Summary path normalized to {}", path.display());
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        result.save(&path)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
