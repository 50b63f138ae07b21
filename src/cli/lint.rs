use crate::cli::LintArgs;
use crate::config::Config;
use crate::output::write_report;
use crate::parser::TracingReporter;
use crate::provider::PhpstanRunner;
use crate::runner::{Buffer, Linter};
use std::io::Read;
use tracing::{error, info};

pub async fn execute(args: LintArgs) -> anyhow::Result<()> {
    info!("Loading config from {:?}", args.config);
    let mut config = Config::load_or_default(&args.config)?;

    // Apply CLI overrides
    if let Some(binary) = args.binary {
        config.binary = Some(binary);
    }
    if let Some(level) = args.level {
        config.level = level;
    }
    if let Some(format) = args.error_format {
        config.error_format = format;
    }
    config.validate()?;

    let reporter = TracingReporter;
    let linter = Linter::new(&config, &PhpstanRunner, &reporter, std::env::current_dir()?);

    let report = match args.stdin_filename {
        Some(path) => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            linter.lint_buffer(&Buffer { path, content }).await?
        }
        None => {
            let paths = if args.paths.is_empty() {
                vec![std::env::current_dir()?]
            } else {
                args.paths
            };
            linter.lint_paths(&paths).await?
        }
    };

    let mut stdout = std::io::stdout().lock();
    write_report(&mut stdout, &report, args.format)?;

    if args.fail_on_error && (!report.findings.is_empty() || report.failed_runs > 0) {
        error!(
            "Exiting with error: {} findings, {} failed runs",
            report.findings.len(),
            report.failed_runs
        );
        std::process::exit(1);
    }

    Ok(())
}
