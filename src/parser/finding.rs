use crate::config::Severity;
use serde::Serialize;
use std::path::PathBuf;

/// Marker prefixed to tips attached to a message
pub const TIP_MARKER: &str = "💡";

/// Bullet PHPStan uses to separate multiple tips
const TIP_BULLET: &str = "•";

/// One reported issue, normalized for display as an inline diagnostic.
///
/// `line` and both column fields are 0-based; `col_start..col_end` is
/// half-open and counted in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub file: PathBuf,

    pub line: usize,

    pub col_start: usize,

    pub col_end: usize,

    pub severity: Severity,

    pub message: String,

    pub code: String,
}

impl Finding {
    /// Build a finding spanning the code portion of `line_text`,
    /// narrowed to `token` when it occurs in the line.
    pub fn locate(
        file: PathBuf,
        line: usize,
        line_text: &str,
        token: Option<&str>,
        severity: Severity,
        message: String,
    ) -> Self {
        let (col_start, col_end) = token
            .and_then(|t| token_columns(line_text, t))
            .unwrap_or_else(|| default_columns(line_text));

        Self {
            file,
            line,
            col_start,
            col_end,
            severity,
            message,
            code: String::new(),
        }
    }
}

/// Columns from the first non-whitespace character to the end of the line
pub fn default_columns(line_text: &str) -> (usize, usize) {
    let len = line_text.chars().count();
    let indent = line_text.chars().take_while(|c| c.is_whitespace()).count();
    (indent, len)
}

/// Columns of the first literal occurrence of `token` in the line
pub fn token_columns(line_text: &str, token: &str) -> Option<(usize, usize)> {
    if token.is_empty() {
        return None;
    }
    let byte_start = line_text.find(token)?;
    let start = line_text[..byte_start].chars().count();
    Some((start, start + token.chars().count()))
}

/// Append a tip to a message on its own line, marker-prefixed
pub fn with_tip(message: &str, tip: Option<&str>) -> String {
    let Some(tip) = tip else {
        return message.to_string();
    };

    let mut tip = tip.replace(TIP_BULLET, TIP_MARKER);
    if !tip.starts_with(TIP_MARKER) {
        tip = format!("{} {}", TIP_MARKER, tip);
    }
    format!("{}\n{}", message, tip)
}
