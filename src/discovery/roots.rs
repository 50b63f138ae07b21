use std::path::{Path, PathBuf};

/// A directory holding a PHPStan config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    pub dir: PathBuf,
    pub config_file: PathBuf,
}

/// Walk up from `start` to the nearest directory containing one of `markers`.
///
/// Markers are checked in order within each directory.
pub fn find_config_root(start: &Path, markers: &[String]) -> Option<ProjectRoot> {
    ancestors_of(start).find_map(|dir| {
        markers.iter().find_map(|marker| {
            let candidate = dir.join(marker);
            candidate.is_file().then(|| ProjectRoot {
                dir: dir.to_path_buf(),
                config_file: candidate,
            })
        })
    })
}

/// Walk up from `start` to the nearest existing `relative` file
/// (e.g. `vendor/autoload.php`)
pub fn find_upwards(start: &Path, relative: &Path) -> Option<PathBuf> {
    ancestors_of(start)
        .map(|dir| dir.join(relative))
        .find(|candidate| candidate.is_file())
}

// Files start the walk at their parent directory
fn ancestors_of(start: &Path) -> std::path::Ancestors<'_> {
    let first = if start.is_file() {
        start.parent().unwrap_or(start)
    } else {
        start
    };
    first.ancestors()
}
