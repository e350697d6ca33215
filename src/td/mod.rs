//! Tabular temporal difference learning over an empirical model
//!
//! The agent never sees the outcome source's probabilities. It learns a
//! model from what it observes:
//!
//! - [`TransitionTable`]: successor counts per (state, action)
//! - [`RewardTable`]: last reward per (state, action, next state)
//! - [`ValueTable`]: V(s) and the Q(s,a) it was maximized from
//!
//! ## Usage Example
//!
//! ```no_run
//! use playcaller::{
//!     adapters::SyntheticSource,
//!     football::PlaycallingEnv,
//!     td::{TdAgent, TdConfig},
//! };
//!
//! let env = PlaycallingEnv::new(SyntheticSource::new());
//! let mut agent = TdAgent::new(
//!     env,
//!     TdConfig::new(
//!         0.95, // gamma
//!         0.05, // alpha
//!     ),
//! )?;
//!
//! let mut test_env = PlaycallingEnv::new(SyntheticSource::new());
//! for _ in 0..10 {
//!     agent.play_n_random_steps(100)?;
//!     agent.value_iteration();
//!     let reward = agent.play_episode(&mut test_env)?;
//!     println!("greedy episode reward: {reward:.2}");
//! }
//! # Ok::<(), playcaller::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod tables;

pub use agent::TdAgent;
pub use config::TdConfig;
pub use tables::{RewardTable, TransitionTable, ValueTable};
