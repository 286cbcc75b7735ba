//! xtask - Development task runner for persistent-deque
//!
//! Usage:
//!   cargo xtask workload --scenario <yaml> [options]
//!   cargo xtask scenarios [--size <n>]

mod scenarios;
mod workload;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development task runner for persistent-deque")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a deque against a `VecDeque` model with a workload configuration
    Workload(workload::WorkloadArgs),
    /// Run the fixed push/pop/index scenarios and report timings
    Scenarios(scenarios::ScenariosArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "persistent_deque=info,xtask=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Workload(args) => workload::run(&args),
        Commands::Scenarios(args) => scenarios::run(&args),
    }
}
