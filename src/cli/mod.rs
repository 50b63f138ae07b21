pub mod lint;
pub mod parse;
pub mod schema;

use crate::config::ErrorFormat;
use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phpstan-lint")]
#[command(
    author,
    version,
    about = "Run PHPStan and map its reports onto editor diagnostics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze files, directories or an unsaved buffer
    Lint(LintArgs),

    /// Turn an existing PHPStan report into findings
    Parse(ParseArgs),

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Parser, Clone)]
pub struct LintArgs {
    /// Files or directories to analyze
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Path to config file
    #[arg(short, long, default_value = "phpstan-lint.yaml")]
    pub config: PathBuf,

    /// Read the buffer for this file from stdin instead of disk
    #[arg(long, value_name = "FILE", conflicts_with = "paths")]
    pub stdin_filename: Option<PathBuf>,

    /// Override the PHPStan executable
    #[arg(long, env = "PHPSTAN_BIN")]
    pub binary: Option<PathBuf>,

    /// Override the rule level used without a project config (0-10 or max)
    #[arg(long)]
    pub level: Option<String>,

    /// Override the report format requested from PHPStan
    #[arg(long)]
    pub error_format: Option<ErrorFormat>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit 1 if any findings were reported (CI mode)
    #[arg(long)]
    pub fail_on_error: bool,
}

#[derive(Parser, Clone)]
pub struct ParseArgs {
    /// Report file (reads stdin if omitted)
    #[arg(value_name = "REPORT")]
    pub report: Option<PathBuf>,

    /// Format of the report
    #[arg(long, default_value = "json")]
    pub error_format: ErrorFormat,

    /// Directory relative report paths are resolved against
    #[arg(long, default_value = ".")]
    pub base: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
