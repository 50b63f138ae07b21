use crate::config::Config;
use crate::discovery::{find_config_root, find_upwards, ProjectRoot};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Looked up on PATH when neither config nor project names an executable
const DEFAULT_BINARY: &str = "phpstan";

/// A fully assembled PHPStan invocation
#[derive(Debug, Clone)]
pub struct AnalyzerCommand {
    pub binary: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: Option<PathBuf>,
}

/// What was found around the analyzed files
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    pub root: Option<ProjectRoot>,
    pub autoload: Option<PathBuf>,
    /// Project-local PHPStan install, e.g. `vendor/bin/phpstan`
    pub local_binary: Option<PathBuf>,
}

impl ProjectContext {
    pub fn discover(start: &Path, config: &Config) -> Self {
        Self {
            root: find_config_root(start, &config.config_markers),
            autoload: find_upwards(start, &config.autoload_file),
            local_binary: find_upwards(start, &config.local_binary),
        }
    }
}

/// Build `phpstan analyse` for `targets`
pub fn build_command(config: &Config, context: &ProjectContext, targets: &[PathBuf]) -> AnalyzerCommand {
    let mut args: Vec<OsString> = vec![
        "analyse".into(),
        config.error_format.as_arg().into(),
        "--no-progress".into(),
        "--no-interaction".into(),
    ];

    // A project config carries its own level; only fall back to ours without one
    match &context.root {
        Some(root) => {
            args.push("--configuration".into());
            args.push(root.config_file.clone().into());
        }
        None => {
            args.push("--level".into());
            args.push(config.level.clone().into());
        }
    }

    if let Some(autoload) = &context.autoload {
        args.push("--autoload-file".into());
        args.push(autoload.clone().into());
    }

    if let Some(limit) = &config.memory_limit {
        args.push(format!("--memory-limit={}", limit).into());
    }

    args.extend(config.extra_args.iter().map(OsString::from));
    args.extend(targets.iter().map(|t| t.clone().into_os_string()));

    AnalyzerCommand {
        binary: config
            .binary
            .clone()
            .or_else(|| context.local_binary.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BINARY)),
        args,
        working_dir: context.root.as_ref().map(|r| r.dir.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorFormat;

    fn args_of(cmd: &AnalyzerCommand) -> Vec<String> {
        cmd.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_without_project_config_uses_level() {
        let config = Config {
            binary: Some(PathBuf::from("/opt/phpstan/bin/phpstan")),
            ..Config::default()
        };
        let cmd = build_command(&config, &ProjectContext::default(), &[PathBuf::from("a.php")]);

        assert_eq!(cmd.binary, PathBuf::from("/opt/phpstan/bin/phpstan"));
        assert_eq!(
            args_of(&cmd),
            vec![
                "analyse",
                "--error-format=json",
                "--no-progress",
                "--no-interaction",
                "--level",
                "max",
                "a.php"
            ]
        );
        assert!(cmd.working_dir.is_none());
    }

    #[test]
    fn test_with_project_config_and_autoload() {
        let config = Config {
            error_format: ErrorFormat::Raw,
            memory_limit: Some("1G".to_string()),
            extra_args: vec!["--xdebug".to_string()],
            ..Config::default()
        };
        let context = ProjectContext {
            root: Some(ProjectRoot {
                dir: PathBuf::from("/srv/app"),
                config_file: PathBuf::from("/srv/app/phpstan.neon"),
            }),
            autoload: Some(PathBuf::from("/srv/app/vendor/autoload.php")),
            local_binary: None,
        };
        let cmd = build_command(&config, &context, &[PathBuf::from("/srv/app/src/A.php")]);

        assert_eq!(
            args_of(&cmd),
            vec![
                "analyse",
                "--error-format=raw",
                "--no-progress",
                "--no-interaction",
                "--configuration",
                "/srv/app/phpstan.neon",
                "--autoload-file",
                "/srv/app/vendor/autoload.php",
                "--memory-limit=1G",
                "--xdebug",
                "/srv/app/src/A.php"
            ]
        );
        assert_eq!(cmd.working_dir, Some(PathBuf::from("/srv/app")));
    }

    #[test]
    fn test_binary_prefers_config_then_project_install() {
        let context = ProjectContext {
            local_binary: Some(PathBuf::from("/srv/app/vendor/bin/phpstan")),
            ..ProjectContext::default()
        };
        let targets = [PathBuf::from("/srv/app/a.php")];

        let cmd = build_command(&Config::default(), &context, &targets);
        assert_eq!(cmd.binary, PathBuf::from("/srv/app/vendor/bin/phpstan"));

        let cmd = build_command(&Config::default(), &ProjectContext::default(), &targets);
        assert_eq!(cmd.binary, PathBuf::from("phpstan"));

        let config = Config {
            binary: Some(PathBuf::from("/usr/local/bin/phpstan")),
            ..Config::default()
        };
        let cmd = build_command(&config, &context, &targets);
        assert_eq!(cmd.binary, PathBuf::from("/usr/local/bin/phpstan"));
    }

    #[test]
    fn test_discover_context() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("vendor")).unwrap();
        std::fs::create_dir_all(dir.path().join("vendor/bin")).unwrap();
        std::fs::write(dir.path().join("vendor/autoload.php"), "<?php").unwrap();
        std::fs::write(dir.path().join("vendor/bin/phpstan"), "").unwrap();
        std::fs::write(dir.path().join("phpstan.neon.dist"), "").unwrap();
        let file = dir.path().join("index.php");
        std::fs::write(&file, "<?php").unwrap();

        let context = ProjectContext::discover(&file, &Config::default());
        assert_eq!(context.root.map(|r| r.dir), Some(dir.path().to_path_buf()));
        assert_eq!(context.autoload, Some(dir.path().join("vendor/autoload.php")));
        assert_eq!(context.local_binary, Some(dir.path().join("vendor/bin/phpstan")));
    }
}
