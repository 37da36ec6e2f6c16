//! Entry filtering: ignore patterns and hidden-entry detection

use std::fs::DirEntry;

use glob::Pattern;

/// Something that can decide whether an entry name is matched.
pub trait NameMatcher: std::fmt::Debug {
    fn matches(&self, name: &str) -> bool;
}

/// Matches a single exact name.
#[derive(Debug, Clone)]
pub struct ExactMatcher(String);

impl ExactMatcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl NameMatcher for ExactMatcher {
    fn matches(&self, name: &str) -> bool {
        self.0 == name
    }
}

/// Matches names against a shell-style glob (`*`, `?`, `[...]`).
#[derive(Debug, Clone)]
pub struct GlobMatcher(Pattern);

impl GlobMatcher {
    /// Compile a glob, returning `None` if the pattern is malformed.
    pub fn new(pattern: &str) -> Option<Self> {
        Pattern::new(pattern).ok().map(Self)
    }
}

impl NameMatcher for GlobMatcher {
    fn matches(&self, name: &str) -> bool {
        self.0.matches(name)
    }
}

/// Ordered collection of matchers; an entry is ignored when any of them hits.
#[derive(Debug, Default)]
pub struct IgnoreSet {
    matchers: Vec<Box<dyn NameMatcher>>,
}

impl IgnoreSet {
    /// Build from user-supplied patterns. Every pattern matches its exact
    /// name; patterns containing glob metacharacters that compile also
    /// match as globs.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut set = Self::default();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            set.push(ExactMatcher::new(pattern));
            if !has_glob_meta(pattern) {
                continue;
            }
            match GlobMatcher::new(pattern) {
                Some(glob) => set.push(glob),
                None => tracing::debug!(
                    "ignore pattern '{}' is not a valid glob, matching exactly",
                    pattern
                ),
            }
        }
        set
    }

    pub fn push<M: NameMatcher + 'static>(&mut self, matcher: M) {
        self.matchers.push(Box::new(matcher));
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(name))
    }
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Check whether a directory entry counts as hidden on this platform.
pub fn is_hidden(name: &str, entry: &DirEntry) -> bool {
    name.starts_with('.') || has_hidden_attribute(entry)
}

#[cfg(windows)]
fn has_hidden_attribute(entry: &DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 2;

    entry
        .metadata()
        .map(|meta| meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn has_hidden_attribute(_entry: &DirEntry) -> bool {
    false
}
