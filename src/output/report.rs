use crate::error::OutputError;
use crate::parser::Finding;
use crate::runner::LintReport;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `path:line:col: severity: message`, 1-based
    #[default]
    Text,
    /// Findings with 0-based positions, for editor integrations
    Json,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    files_scanned: usize,
    failed_runs: usize,
    findings: &'a [Finding],
}

/// Write a lint report in the requested format
pub fn write_report<W: Write>(
    out: &mut W,
    report: &LintReport,
    format: OutputFormat,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Text => write_text(out, report),
        OutputFormat::Json => {
            let json = JsonReport {
                generated_at: Utc::now(),
                files_scanned: report.files_scanned,
                failed_runs: report.failed_runs,
                findings: &report.findings,
            };
            serde_json::to_writer_pretty(&mut *out, &json)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_text<W: Write>(out: &mut W, report: &LintReport) -> Result<(), OutputError> {
    for finding in &report.findings {
        let mut lines = finding.message.lines();
        writeln!(
            out,
            "{}:{}:{}: {}: {}",
            finding.file.display(),
            finding.line + 1,
            finding.col_start + 1,
            finding.severity,
            lines.next().unwrap_or("")
        )?;
        // Tips continue on indented lines
        for rest in lines {
            writeln!(out, "    {}", rest)?;
        }
    }

    if report.findings.is_empty() && report.failed_runs == 0 {
        writeln!(out, "No errors in {} files", report.files_scanned)?;
    }
    Ok(())
}
