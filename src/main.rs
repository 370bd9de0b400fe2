//! Command-line interface for docstore-loadtest
//!
//! # Usage Examples
//!
//! ## Run a load test
//! ```bash
//! # Defaults: 2400 users, 20 iterations each, 100 collections, 10% shared docs
//! docstore-loadtest run
//!
//! # Parameters from a file, overridden on the command line
//! docstore-loadtest run --config loadtest.toml --users 100 --seed 7
//! ```
//!
//! ## Inspect results
//! ```bash
//! docstore-loadtest report metrics.json
//! ```
//!
//! Set `RUST_LOG=loadtest_engine=debug` to follow every user's progress.

use clap::{Parser, Subcommand};
use docstore_loadtest::{run_load_test, run_report, ReportArgs, RunArgs};

#[derive(Parser)]
#[command(name = "docstore-loadtest")]
#[command(about = "Concurrent load generator for document stores")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate concurrent users against the backend and save latency metrics
    Run {
        #[command(flatten)]
        args: RunArgs,
    },

    /// Summarize a metrics file written by `run`
    Report {
        #[command(flatten)]
        args: ReportArgs,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { args } => {
            run_load_test(args).await?;
        }
        Commands::Report { args } => {
            run_report(&args)?;
        }
    }

    Ok(())
}
