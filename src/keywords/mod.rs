//! Keyword list loading.
//!
//! A keyword list is a text file with one keyword per line. Surrounding
//! whitespace is trimmed, blank lines and `#` comments are skipped and
//! duplicates keep their first position.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Keyword list errors
#[derive(Error, Debug)]
pub enum KeywordListError {
    #[error("Failed to read keyword list {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered set of keywords to look for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a keyword list file
    pub fn load(path: &Path) -> Result<Self, KeywordListError> {
        let content = fs::read_to_string(path).map_err(|source| KeywordListError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::parse(&content);
        debug!("Loaded {} keywords from {}", set.len(), path.display());
        Ok(set)
    }

    /// Parse keyword list content
    pub fn parse(content: &str) -> Self {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#'))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let keywords = iter
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .filter(|k| seen.insert(k.clone()))
            .collect();
        Self { keywords }
    }
}
