use super::finding::Finding;
use super::source::SourceLines;
use crate::config::Severity;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

// `path:line:message`; the path is greedy so drive letters stay intact
static RAW_LINE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(?P<file>.*):(?P<line>[0-9]+):(?P<message>.+)$").ok());

/// Parse `--error-format=raw` output, one finding per matching line.
///
/// Lines that do not look like `path:line:message` are skipped.
pub fn parse_raw_report(raw: &str, sources: &dyn SourceLines, severity: Severity) -> Vec<Finding> {
    let Some(re) = RAW_LINE.as_ref() else {
        return Vec::new();
    };

    raw.lines()
        .filter_map(|text| {
            let caps = re.captures(text.trim_end())?;
            let file = PathBuf::from(caps.name("file")?.as_str());
            let line = caps
                .name("line")?
                .as_str()
                .parse::<usize>()
                .ok()?
                .saturating_sub(1);
            let message = caps.name("message")?.as_str().trim().to_string();
            let line_text = sources.line(&file, line).unwrap_or_default();

            Some(Finding::locate(file, line, &line_text, None, severity, message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn lines(_: &Path, index: usize) -> Option<String> {
        Some(format!("  line{}", index))
    }

    #[test]
    fn test_parse_raw_lines() {
        let raw = "/srv/app/User.php:12:Undefined variable: $x\n\
                   /srv/app/User.php:3:Method App\\User::a() has no return type specified.\n";
        let findings = parse_raw_report(raw, &lines, Severity::Warning);

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].file, PathBuf::from("/srv/app/User.php"));
        assert_eq!(findings[0].line, 11);
        assert_eq!(findings[0].message, "Undefined variable: $x");
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!((findings[0].col_start, findings[0].col_end), (2, 8));
        assert_eq!(findings[1].line, 2);
    }

    #[test]
    fn test_windows_drive_letter() {
        let findings = parse_raw_report(r"C:\app\User.php:7:Bad thing", &lines, Severity::Error);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].file, PathBuf::from(r"C:\app\User.php"));
        assert_eq!(findings[0].line, 6);
    }

    #[test]
    fn test_skips_noise() {
        let raw = "Note: Using configuration file /srv/phpstan.neon.\n\n [OK] No errors\n";
        assert!(parse_raw_report(raw, &lines, Severity::Error).is_empty());
    }
}
