use super::{Analyzer, AnalyzerOutput};
use crate::command::AnalyzerCommand;
use crate::error::AnalyzerError;
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout as tokio_timeout;
use tracing::debug;

/// Exit code PHPStan uses when it found errors
const EXIT_ERRORS_FOUND: i32 = 1;

/// Runs PHPStan as a child process
pub struct PhpstanRunner;

#[async_trait]
impl Analyzer for PhpstanRunner {
    async fn execute(
        &self,
        command: &AnalyzerCommand,
        timeout: Duration,
    ) -> Result<AnalyzerOutput, AnalyzerError> {
        let mut cmd = Command::new(&command.binary);

        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }
        cmd.args(&command.args).kill_on_drop(true);

        debug!("Running {:?} {:?}", command.binary, command.args);
        let start = std::time::Instant::now();

        let output = tokio_timeout(timeout, cmd.output())
            .await
            .map_err(|_| AnalyzerError::Timeout(timeout))?
            .map_err(AnalyzerError::Io)?;

        let result = AnalyzerOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration: start.elapsed(),
            exit_code: output.status.code().unwrap_or(-1),
        };

        // 0 is a clean run, 1 means findings were reported
        if !output.status.success() && result.exit_code != EXIT_ERRORS_FOUND {
            return Err(AnalyzerError::NonZeroExit {
                code: result.exit_code,
                stderr: result.stderr.clone(),
            });
        }

        debug!(
            "PHPStan exited with {} after {:.1}s",
            result.exit_code,
            result.duration.as_secs_f64()
        );
        Ok(result)
    }
}
