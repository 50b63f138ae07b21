mod finding;
mod json;
mod offset_key;
mod raw;
mod reporter;
mod source;

pub use finding::Finding;
pub use reporter::{Reporter, TracingReporter};
pub use source::{SourceCache, SourceLines};

use crate::config::{ErrorFormat, Severity};

/// Parse findings from analyzer output in the given error format
pub fn parse_findings(
    raw: &str,
    format: ErrorFormat,
    sources: &dyn SourceLines,
    reporter: &dyn Reporter,
    default_severity: Severity,
) -> Vec<Finding> {
    let findings = match format {
        ErrorFormat::Json => json::parse_json_report(raw, sources, reporter),
        ErrorFormat::Raw => raw::parse_raw_report(raw, sources, default_severity),
    };

    tracing::debug!("Parsed {} findings from {:?} output", findings.len(), format);
    findings
}
