use crate::error::DiscoveryError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Include/exclude globs deciding which files get analyzed
pub struct FileFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl FileFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, DiscoveryError> {
        Ok(Self {
            include: build_set(include, "include set")?,
            exclude: build_set(exclude, "exclude set")?,
        })
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

fn build_set(patterns: &[String], name: &str) -> Result<GlobSet, DiscoveryError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| DiscoveryError::GlobPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| DiscoveryError::GlobPattern {
        pattern: name.to_string(),
        source: e,
    })
}

/// Expand paths into the files to analyze.
///
/// Directories are walked respecting .gitignore; files given directly are
/// kept only when they pass the filter too.
pub fn collect_files(paths: &[PathBuf], filter: &FileFilter) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if filter.matches(path) {
                files.push(path.clone());
            }
            continue;
        }
        if !path.exists() {
            return Err(DiscoveryError::MissingPath(path.clone()));
        }

        let walker = WalkBuilder::new(path)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        for entry in walker {
            let entry = entry?;
            let file = entry.path();
            if file.is_dir() {
                continue;
            }

            // Match relative to the walked root so excludes like `vendor/**` apply
            let rel = file.strip_prefix(path).unwrap_or(file);
            if filter.matches(rel) {
                files.push(file.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}
