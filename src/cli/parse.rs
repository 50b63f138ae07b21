use crate::cli::ParseArgs;
use crate::config::Severity;
use crate::output::write_report;
use crate::parser::{parse_findings, SourceCache, TracingReporter};
use crate::runner::LintReport;
use std::io::Read;

pub fn execute(args: ParseArgs) -> anyhow::Result<()> {
    let raw = match &args.report {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            content
        }
    };

    let sources = SourceCache::new(&args.base);
    let findings = parse_findings(
        &raw,
        args.error_format,
        &sources,
        &TracingReporter,
        Severity::Error,
    );

    let mut files: Vec<_> = findings.iter().map(|f| &f.file).collect();
    files.sort();
    files.dedup();

    let report = LintReport {
        files_scanned: files.len(),
        findings,
        failed_runs: 0,
    };

    let mut stdout = std::io::stdout().lock();
    write_report(&mut stdout, &report, args.format)?;
    Ok(())
}
