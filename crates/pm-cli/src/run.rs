//! Implementation of the `pm-cli run` subcommand: load a system/activities
//! document, run the NSGA-II optimizer, and write the result as JSON.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use pm_algo::{Nsga2, Nsga2Config};

use crate::io::{build_activities, build_system, history_output, OptimizerInput};

/// Parameters for one `run` invocation, mirroring [`crate::cli::Commands::Run`].
pub struct RunArgs<'a> {
    pub input: &'a Path,
    pub out: Option<&'a Path>,
    pub population: usize,
    pub generations: usize,
    pub p_mutation: f64,
    pub seed: u64,
    pub parallel: bool,
    pub history: bool,
}

/// Loads `args.input`, runs the optimizer, and writes either the final
/// Pareto front or the full generation-by-generation population history
/// (`args.history`) as JSON to `args.out` (stdout if unset).
pub fn handle_run(args: RunArgs<'_>) -> Result<()> {
    let input: OptimizerInput = {
        let file = File::open(args.input)
            .with_context(|| format!("opening input file: {}", args.input.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).context("parsing optimizer input JSON")?
    };

    let system = Arc::new(build_system(&input.system).context("building system graph")?);
    let activities = build_activities(&input.activities).context("building activities")?;

    tracing::info!(
        components = activities.len(),
        resources = system.resources,
        regular_flow = system.regular_flow,
        "loaded optimizer input"
    );

    let config = Nsga2Config::builder()
        .init_pop_size(args.population)
        .n_generations(args.generations)
        .p_mutation(args.p_mutation)
        .seed(args.seed)
        .parallel(args.parallel)
        .build();

    let nsga2 = Nsga2::new(system, activities, config);
    let history = nsga2.run().context("running NSGA-II")?;

    let output = history_output(&history);
    let json = if args.history {
        serde_json::to_string_pretty(&output)?
    } else {
        let last_generation = output.last().expect("history always has at least the seed generation");
        let front: Vec<_> = last_generation.iter().filter(|ind| ind.rank == 1).collect();
        serde_json::to_string_pretty(&front)?
    };

    match args.out {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("creating output file: {}", path.display()))?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            tracing::info!(path = %path.display(), "wrote result");
        }
        None => println!("{json}"),
    }

    Ok(())
}
