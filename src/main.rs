use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod command;
mod config;
mod discovery;
mod error;
mod output;
mod parser;
mod provider;
mod runner;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("phpstan_lint=debug")
    } else {
        EnvFilter::new("phpstan_lint=warn")
    };

    // Logs go to stderr so stdout stays machine-readable
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lint(args) => cli::lint::execute(args).await,
        Commands::Parse(args) => cli::parse::execute(args),
        Commands::Schema => cli::schema::execute(),
    }
}
