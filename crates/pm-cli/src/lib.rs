//! # pm-cli: Command-Line Front End
//!
//! The ambient entry point for the preventive-maintenance grouping
//! optimizer: loads a system/activities description from JSON, drives
//! [`pm_algo::Nsga2`], and writes the resulting Pareto front (or the full
//! `population_history`, with `--history`) back out as JSON.
//!
//! This is the natural non-web replacement for a Flask endpoint exposing
//! the optimizer: the algorithm itself stays free of any web/UI concerns,
//! but a complete crate still needs a front door.
//!
//! ## Modules
//!
//! - [`cli`] - argument parsing (via `clap`)
//! - [`io`] - JSON input/output schema and conversion to/from `pm-core` types
//! - [`run`] - the `run` subcommand's implementation

pub mod cli;
pub mod io;
pub mod run;

pub use cli::{Cli, Commands};
