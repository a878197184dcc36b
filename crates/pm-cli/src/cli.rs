use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    /// Thread count for parallel population init/mutation ("auto" uses all cores)
    #[arg(long, default_value = "1")]
    pub threads: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the NSGA-II maintenance grouping optimizer
    Run {
        /// Path to a JSON system/activity input file
        #[arg(long)]
        input: PathBuf,

        /// Path to write the resulting population history as JSON
        #[arg(long)]
        out: Option<PathBuf>,

        /// Population size maintained each generation
        #[arg(long, default_value_t = 50)]
        population: usize,

        /// Number of generations to run
        #[arg(long, default_value_t = 20)]
        generations: usize,

        /// Per-component mutation probability
        #[arg(long, default_value_t = 0.1)]
        p_mutation: f64,

        /// RNG seed for reproducible runs
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Generate population init/mutation in parallel across individuals
        #[arg(long)]
        parallel: bool,

        /// Emit every generation's population instead of just the final front
        #[arg(long)]
        history: bool,
    },
}
