use tracing::{debug, error, warn};

/// Sink for problems met while parsing a report.
///
/// Passed into the parser so callers decide where failures surface.
pub trait Reporter {
    /// Record the raw analyzer output that could not be parsed
    fn raw_output(&self, raw: &str);

    /// Surface a failure of this run to the user, once
    fn notify_failure(&self, message: &str);

    /// An analyzer error not attached to any file
    fn general_error(&self, message: &str) {
        warn!("PHPStan: {}", message);
    }
}

/// Reports through `tracing`
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn raw_output(&self, raw: &str) {
        debug!("Raw analyzer output:\n{}", raw);
    }

    fn notify_failure(&self, message: &str) {
        error!("{}", message);
    }
}
