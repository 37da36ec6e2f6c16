//! In-memory tree produced by the walker

use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

/// One filesystem entry. Directories carry their filtered, sorted children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Local>>,
    /// Set when the entry (or its listing) could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Node {
    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name.into(), NodeKind::Directory)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name.into(), NodeKind::File)
    }

    fn new(name: String, kind: NodeKind) -> Self {
        Self {
            name,
            kind,
            children: Vec::new(),
            size: None,
            modified: None,
            error: None,
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_modified(mut self, modified: DateTime<Local>) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_unreadable(&self) -> bool {
        self.error.is_some()
    }

    /// Count (directories, files) below this node, not counting the node itself.
    pub fn counts(&self) -> (usize, usize) {
        let mut dirs = 0;
        let mut files = 0;
        let mut stack: Vec<&Node> = self.children.iter().collect();
        while let Some(node) = stack.pop() {
            if node.is_dir() {
                dirs += 1;
                stack.extend(node.children.iter());
            } else {
                files += 1;
            }
        }
        (dirs, files)
    }
}
