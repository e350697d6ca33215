//! Random command - Play possessions with random play calls

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use super::open_outcome_source;
use crate::{
    cli::output::{format_number, format_reward, print_kv, print_section, print_subsection},
    football::{PlayCall, PlaycallingEnv},
    pipeline::{EpisodeSummary, mean_reward, random_play},
};

#[derive(Parser, Debug)]
#[command(about = "Play possessions with uniformly random play calls")]
pub struct RandomArgs {
    /// Number of possessions to play
    #[arg(long, short = 'e', default_value_t = 1)]
    pub episodes: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// CSV outcome table; synthetic outcomes are used when omitted
    #[arg(long)]
    pub outcomes: Option<PathBuf>,

    /// Print the field after every play of the first possession
    #[arg(long)]
    pub render: bool,
}

pub fn execute(args: RandomArgs) -> Result<()> {
    let mut env = PlaycallingEnv::new(open_outcome_source(args.outcomes.as_deref())?);
    let mut rng = match args.seed {
        Some(seed) => {
            env.set_rng_seed(seed.wrapping_add(1));
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_rng(&mut rand::rng()),
    };

    print_section("Random play calling");

    let mut summaries: Vec<EpisodeSummary> = Vec::with_capacity(args.episodes);
    let mut remaining = args.episodes;
    if args.render && remaining > 0 {
        summaries.push(render_episode(&mut env, &mut rng)?);
        remaining -= 1;
    }
    summaries.extend(random_play(&mut env, remaining, &mut rng)?);

    print_subsection("Results");
    print_kv("Episodes", &format_number(summaries.len()));
    print_kv("Mean reward", &format_reward(mean_reward(&summaries)));
    let steps: usize = summaries.iter().map(|s| s.steps).sum();
    print_kv("Total plays", &format_number(steps));

    Ok(())
}

fn render_episode<S>(env: &mut PlaycallingEnv<S>, rng: &mut StdRng) -> Result<EpisodeSummary>
where
    S: crate::ports::OutcomeSource,
{
    env.reset();
    println!("{}", env.render());
    let mut summary = EpisodeSummary {
        steps: 0,
        total_reward: 0.0,
    };
    loop {
        let call = PlayCall::sample(rng);
        let step = env.step(call)?;
        summary.steps += 1;
        summary.total_reward += step.reward;
        println!("\n{} -> reward {}", call, format_reward(step.reward));
        println!("{}", env.render());
        if step.done {
            break;
        }
    }
    Ok(summary)
}
