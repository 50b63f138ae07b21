use super::finding::{with_tip, Finding};
use super::offset_key::extract_token;
use super::reporter::Reporter;
use super::source::SourceLines;
use crate::config::Severity;
use crate::error::ParserError;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Top level of `phpstan analyse --error-format=json`
#[derive(Debug, Deserialize)]
pub struct ReportDocument {
    #[serde(default, deserialize_with = "ordered_files")]
    pub files: Option<Vec<(String, FileReport)>>,

    /// Errors not tied to a file (bad config, crashed workers)
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FileReport {
    #[serde(default)]
    pub messages: Vec<ReportMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ReportMessage {
    pub message: String,

    /// 1-based; absent for a few file-level errors
    #[serde(default)]
    pub line: Option<usize>,

    #[serde(default)]
    pub tip: Option<String>,

    #[serde(default)]
    pub identifier: Option<String>,
}

// `files` must keep document order, which a HashMap would lose
fn ordered_files<'de, D>(deserializer: D) -> Result<Option<Vec<(String, FileReport)>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedFiles;

    impl<'de> Visitor<'de> for OrderedFiles {
        type Value = Vec<(String, FileReport)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of file paths to message lists")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut files = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, FileReport>()? {
                files.push(entry);
            }
            Ok(files)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        // PHPStan serializes an empty PHP array as `[]`
        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::SeqAccess<'de>,
        {
            while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(OrderedFiles).map(Some)
}

/// Decode the report without interpreting it
pub fn decode_report(raw: &str) -> Result<ReportDocument, ParserError> {
    Ok(serde_json::from_str(raw.trim())?)
}

/// Parse a JSON report into findings, in document order.
///
/// Malformed output is reported through `reporter` and yields no findings.
pub fn parse_json_report(
    raw: &str,
    sources: &dyn SourceLines,
    reporter: &dyn Reporter,
) -> Vec<Finding> {
    let document = match decode_report(raw) {
        Ok(doc) => doc,
        Err(e) => {
            reporter.raw_output(raw);
            reporter.notify_failure(&e.to_string());
            return Vec::new();
        }
    };

    for error in &document.errors {
        reporter.general_error(error);
    }

    let Some(files) = document.files else {
        tracing::debug!("Report has no files key, treating as clean run");
        return Vec::new();
    };

    let mut findings = Vec::new();
    for (file, report) in files {
        let path = PathBuf::from(file);
        for msg in report.messages {
            findings.push(build_finding(&path, msg, sources));
        }
    }
    findings
}

fn build_finding(path: &Path, msg: ReportMessage, sources: &dyn SourceLines) -> Finding {
    let line = msg.line.unwrap_or(1).saturating_sub(1);
    let message = with_tip(&msg.message, msg.tip.as_deref());
    let line_text = sources.line(path, line).unwrap_or_default();

    let token = msg
        .identifier
        .as_deref()
        .and_then(|id| extract_token(id, &msg.message));

    Finding::locate(
        path.to_path_buf(),
        line,
        &line_text,
        token.as_deref(),
        Severity::Error,
        message,
    )
}
