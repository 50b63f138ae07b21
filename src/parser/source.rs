use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONTEXT_SUFFIX: &str = " (in context of ";

/// Read-only access to the text of analyzed files, one line at a time
pub trait SourceLines {
    /// Full text of the 0-based line, without its terminator
    fn line(&self, file: &Path, index: usize) -> Option<String>;
}

impl<F> SourceLines for F
where
    F: Fn(&Path, usize) -> Option<String>,
{
    fn line(&self, file: &Path, index: usize) -> Option<String> {
        self(file, index)
    }
}

/// Serves lines from in-memory buffers first, then from disk.
///
/// Files are read once per cache; relative report paths resolve against `base`.
pub struct SourceCache {
    base: PathBuf,
    buffers: HashMap<PathBuf, String>,
    loaded: RefCell<HashMap<PathBuf, Option<Vec<String>>>>,
}

impl SourceCache {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            buffers: HashMap::new(),
            loaded: RefCell::new(HashMap::new()),
        }
    }

    /// Serve `path` from `content` instead of reading it from disk
    pub fn with_buffer(mut self, path: impl Into<PathBuf>, content: String) -> Self {
        self.buffers.insert(path.into(), content);
        self
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        let file = strip_context(file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.base.join(file)
        }
    }
}

// Errors inside traits are keyed `Trait.php (in context of class Foo)`
fn strip_context(file: &Path) -> &Path {
    file.to_str()
        .and_then(|s| s.find(CONTEXT_SUFFIX).map(|i| Path::new(&s[..i])))
        .unwrap_or(file)
}

impl SourceLines for SourceCache {
    fn line(&self, file: &Path, index: usize) -> Option<String> {
        if let Some(buffer) = self.buffers.get(file) {
            return buffer.lines().nth(index).map(str::to_string);
        }

        let path = self.resolve(file);
        let mut loaded = self.loaded.borrow_mut();
        let lines = loaded.entry(path.clone()).or_insert_with(|| {
            match std::fs::read_to_string(&path) {
                Ok(content) => Some(content.lines().map(str::to_string).collect()),
                Err(e) => {
                    debug!("Cannot read source {:?}: {}", path, e);
                    None
                }
            }
        });
        lines.as_ref()?.get(index).cloned()
    }
}
