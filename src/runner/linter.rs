use crate::command::{build_command, ProjectContext};
use crate::config::Config;
use crate::discovery::{collect_files, FileFilter};
use crate::error::LintError;
use crate::parser::{parse_findings, Finding, Reporter, SourceCache};
use crate::provider::Analyzer;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Unsaved editor content for `path`
#[derive(Debug, Clone)]
pub struct Buffer {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct LintReport {
    pub files_scanned: usize,
    pub findings: Vec<Finding>,
    /// Analyzer runs that failed outright
    pub failed_runs: usize,
}

impl LintReport {
    fn merge(&mut self, other: LintReport) {
        self.files_scanned += other.files_scanned;
        self.findings.extend(other.findings);
        self.failed_runs += other.failed_runs;
    }
}

pub struct Linter<'a> {
    config: &'a Config,
    analyzer: &'a dyn Analyzer,
    reporter: &'a dyn Reporter,
    /// Relative paths and executables resolve against this directory
    base_dir: PathBuf,
}

impl<'a> Linter<'a> {
    pub fn new(
        config: &'a Config,
        analyzer: &'a dyn Analyzer,
        reporter: &'a dyn Reporter,
        base_dir: PathBuf,
    ) -> Self {
        Self {
            config,
            analyzer,
            reporter,
            base_dir,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Analyze files and directories on disk, one run per PHPStan project
    pub async fn lint_paths(&self, paths: &[PathBuf]) -> Result<LintReport, LintError> {
        let filter = FileFilter::new(&self.config.include, &self.config.exclude)?;
        // Discovery walks ancestors and the child runs from the project root,
        // so everything past this point works on absolute paths
        let paths: Vec<PathBuf> = paths.iter().map(|p| self.resolve(p)).collect();
        let files = collect_files(&paths, &filter)?;
        if files.is_empty() {
            info!("No matching files to analyze");
            return Ok(LintReport::default());
        }

        // Group by project root so each run uses the right config
        let mut groups: BTreeMap<Option<PathBuf>, (ProjectContext, Vec<PathBuf>)> = BTreeMap::new();
        for file in files {
            let context = ProjectContext::discover(&file, self.config);
            let key = context.root.as_ref().map(|r| r.dir.clone());
            groups
                .entry(key)
                .or_insert_with(|| (context, Vec::new()))
                .1
                .push(file);
        }

        let mut report = LintReport::default();
        for (_, (context, targets)) in groups {
            let base = context
                .root
                .as_ref()
                .map(|r| r.dir.clone())
                .unwrap_or_else(|| self.base_dir.clone());
            let sources = SourceCache::new(base);
            report.merge(self.run(&context, &targets, &sources).await);
        }
        Ok(report)
    }

    /// Analyze an unsaved buffer through a temp file, reporting against its real path
    pub async fn lint_buffer(&self, buffer: &Buffer) -> Result<LintReport, LintError> {
        let file_name = buffer
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "buffer.php".to_string());

        let mut temp = tempfile::Builder::new()
            .prefix("phpstan-lint-")
            .suffix(&format!("-{}", file_name))
            .tempfile()?;
        temp.write_all(buffer.content.as_bytes())?;
        temp.flush()?;
        let temp_path = temp.path().to_path_buf();
        debug!("Buffer for {:?} written to {:?}", buffer.path, temp_path);

        // Discover from the real location so the project's config applies
        let start = self.resolve(&buffer.path);
        let context = ProjectContext::discover(&start, self.config);
        let sources = SourceCache::new(start.parent().unwrap_or(&start))
            .with_buffer(&temp_path, buffer.content.clone())
            .with_buffer(&buffer.path, buffer.content.clone());

        let mut report = self.run(&context, &[temp_path.clone()], &sources).await;
        for finding in &mut report.findings {
            if is_same_temp_file(&finding.file, &temp_path) {
                finding.file = buffer.path.clone();
            }
        }
        Ok(report)
    }

    async fn run(&self, context: &ProjectContext, targets: &[PathBuf], sources: &SourceCache) -> LintReport {
        let mut command = build_command(self.config, context, targets);
        // `./bin/phpstan` must not be looked up from the project root
        if command.binary.is_relative() && command.binary.components().count() > 1 {
            command.binary = self.resolve(&command.binary);
        }
        let timeout = Duration::from_secs(self.config.timeout_sec);

        let output = match self.analyzer.execute(&command, timeout).await {
            Ok(out) => out,
            Err(e) => {
                warn!("PHPStan run over {} files failed", targets.len());
                self.reporter.notify_failure(&e.to_string());
                return LintReport {
                    files_scanned: targets.len(),
                    findings: Vec::new(),
                    failed_runs: 1,
                };
            }
        };

        if !output.stderr.trim().is_empty() {
            debug!("PHPStan stderr: {}", output.stderr.trim());
        }

        let findings = parse_findings(
            &output.stdout,
            self.config.error_format,
            sources,
            self.reporter,
            self.config.default_severity,
        );
        info!(
            "{} findings in {} files ({:.1}s)",
            findings.len(),
            targets.len(),
            output.duration.as_secs_f64()
        );

        LintReport {
            files_scanned: targets.len(),
            findings,
            failed_runs: 0,
        }
    }
}

// PHPStan reports the resolved path, which may differ by symlinked temp dirs
fn is_same_temp_file(reported: &Path, temp: &Path) -> bool {
    reported == temp || (reported.is_absolute() && reported.file_name() == temp.file_name())
}
