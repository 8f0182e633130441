//! Demo of the xtypes containers (feature-gated).

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;
use xtypes::cli::demo::{self, DEFAULT_SEED};
use xtypes::cli::{CliError, DemoConfig, ExitCode};

#[derive(Parser, Debug)]
#[command(name = "xtypes", version, about = "Priority queue, queue and semaphore demo")]
struct Cli {
    /// Number of tasks in the example
    #[arg(long, default_value_t = 10)]
    size: usize,

    /// Maximum tasks processed in parallel (defaults to available parallelism)
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Seed for task priorities
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbosity: u8,
}

impl Cli {
    fn to_config(&self) -> DemoConfig {
        let defaults = DemoConfig::default();
        DemoConfig {
            size: self.size,
            workers: self.workers.unwrap_or(defaults.workers),
            seed: self.seed,
        }
    }

    const fn default_directive(&self) -> &'static str {
        match self.verbosity {
            0 => "info",
            1 => "xtypes=debug,info",
            _ => "trace",
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match demo::run(&cli.to_config()) {
        Ok(report) => {
            tracing::info!(
                in_order = report.in_order.len(),
                parallel = report.parallel,
                "done"
            );
            std::process::exit(ExitCode::SUCCESS);
        }
        Err(err) => exit_with(&err),
    }
}

fn exit_with(err: &CliError) -> ! {
    eprint!("{}", err.human_format());
    std::process::exit(err.exit_code);
}
