//! Configuration types for the tree walker

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Names or glob patterns of entries to leave out, subtree included.
    pub ignore_patterns: Vec<String>,
    /// Include non-directory entries. Off by default: directories only.
    pub show_files: bool,
    /// Include entries whose names start with a dot (or are marked hidden on Windows).
    pub show_hidden: bool,
    pub show_size: bool,
    pub show_modified_time: bool,
    /// Descend only this many levels below the root.
    pub max_depth: Option<usize>,
}

impl WalkerConfig {
    /// Whether any per-entry metadata has to be read.
    pub fn needs_metadata(&self) -> bool {
        self.show_size || self.show_modified_time
    }
}
