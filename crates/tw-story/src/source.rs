//! Where story documents come from.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{StoryError, StoryResult};

/// File extensions treated as story documents by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["json", "txt"];

/// A place that offers story documents by name.
pub trait StorySource {
    /// Names of every candidate document, in display order.
    fn list_candidates(&self) -> io::Result<Vec<String>>;

    /// Raw bytes of the named document.
    fn read_source(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Story documents stored as files in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl DirectorySource {
    /// Offer files in `dir` with one of the default extensions.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Replace the accepted extensions (compared case-insensitively).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.into().to_lowercase())
            .collect();
        self
    }

    /// Full path of a named document.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Like [`StorySource::list_candidates`], but an empty directory is an
    /// error.
    pub fn require_candidates(&self) -> StoryResult<Vec<String>> {
        let names = self.list_candidates()?;
        if names.is_empty() {
            return Err(StoryError::NoCandidatesFound(self.dir.clone()));
        }
        Ok(names)
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
    }
}

impl StorySource for DirectorySource {
    fn list_candidates(&self) -> io::Result<Vec<String>> {
        let mut names: Vec<String> = std::fs::read_dir(&self.dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
            .map(|e| e.path())
            .filter(|p| self.accepts(p))
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect();
        names.sort();
        Ok(names)
    }

    fn read_source(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.path_of(name))
    }
}
