use clap::Parser;
use rayon::ThreadPoolBuilder;
use tracing_subscriber::FmtSubscriber;

use pm_cli::cli::{Cli, Commands};
use pm_cli::run::{handle_run, RunArgs};

fn configure_threads(spec: &str) {
    let count = if spec.eq_ignore_ascii_case("auto") {
        num_cpus::get()
    } else {
        spec.parse().unwrap_or_else(|_| num_cpus::get())
    };
    let _ = ThreadPoolBuilder::new().num_threads(count).build_global();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(cli.log_level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    configure_threads(&cli.threads);

    match cli.command {
        Commands::Run { input, out, population, generations, p_mutation, seed, parallel, history } => {
            handle_run(RunArgs {
                input: &input,
                out: out.as_deref(),
                population,
                generations,
                p_mutation,
                seed,
                parallel,
                history,
            })
        }
    }
}
