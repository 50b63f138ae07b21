mod phpstan;

pub use phpstan::PhpstanRunner;

use crate::command::AnalyzerCommand;
use crate::error::AnalyzerError;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug)]
pub struct AnalyzerOutput {
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
    pub exit_code: i32,
}

#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn execute(
        &self,
        command: &AnalyzerCommand,
        timeout: Duration,
    ) -> Result<AnalyzerOutput, AnalyzerError>;
}
