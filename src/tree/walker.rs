//! TreeWalker - builds the filtered tree in memory
//!
//! The walk is a depth-first pre-order traversal driven by an explicit stack
//! of open directories, so arbitrarily deep trees cannot overflow the call
//! stack.

use std::fs::{self, DirEntry, FileType};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, TreeError};

use super::config::WalkerConfig;
use super::filter::{IgnoreSet, is_hidden};
use super::node::Node;
use super::utils::{compare_entries, directory_size, to_local};

/// What a listed entry turned out to be.
#[derive(Debug)]
enum EntryType {
    Dir,
    /// Symlink resolving to a directory. Shown as a directory, never entered.
    LinkedDir,
    Other,
    /// The type lookup itself failed.
    Unknown(io::Error),
}

impl EntryType {
    fn classify(file_type: io::Result<FileType>, path: &Path) -> Self {
        match file_type {
            Ok(ft) if ft.is_dir() => EntryType::Dir,
            Ok(ft) if ft.is_symlink() => match fs::metadata(path) {
                Ok(target) if target.is_dir() => EntryType::LinkedDir,
                _ => EntryType::Other,
            },
            Ok(_) => EntryType::Other,
            Err(e) => EntryType::Unknown(e),
        }
    }

    fn is_dir(&self) -> bool {
        matches!(self, EntryType::Dir | EntryType::LinkedDir)
    }
}

/// A listed directory entry that survived filtering.
#[derive(Debug)]
struct Entry {
    name: String,
    path: PathBuf,
    entry_type: EntryType,
}

/// A directory whose children are still being visited.
struct Frame {
    node: Node,
    depth: usize,
    pending: std::vec::IntoIter<Entry>,
    /// Bytes below this directory, filtered-out entries included.
    total_size: u64,
}

impl Frame {
    fn closed(node: Node, depth: usize, total_size: u64) -> Self {
        Self {
            node,
            depth,
            pending: Vec::new().into_iter(),
            total_size,
        }
    }

    fn adopt(&mut self, child: Node, child_size: u64) {
        self.total_size += child_size;
        self.node.children.push(child);
    }

    fn finish(mut self, show_size: bool) -> (Node, u64) {
        if show_size {
            self.node.size = Some(self.total_size);
        }
        (self.node, self.total_size)
    }
}

enum Visit {
    Leaf(Node),
    Descend(Frame),
}

/// Tree walker that builds the full tree in memory.
pub struct TreeWalker {
    config: WalkerConfig,
    ignore: IgnoreSet,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        let ignore = IgnoreSet::from_patterns(&config.ignore_patterns);
        Self { config, ignore }
    }

    /// Replace the ignore set built from `ignore_patterns` with a custom one.
    pub fn with_ignore_set(mut self, ignore: IgnoreSet) -> Self {
        self.ignore = ignore;
        self
    }

    /// Walk `root` and return its tree. Fails only when `root` is not an
    /// existing directory; problems below the root are recorded on the
    /// affected nodes.
    pub fn walk(&self, root: &Path) -> Result<Node> {
        let meta = fs::metadata(root).map_err(|e| TreeError::InvalidRoot {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !meta.is_dir() {
            return Err(TreeError::InvalidRoot {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        tracing::debug!("walking '{}'", root.display());

        let mut root_node = Node::directory(root_name(root));
        if self.config.show_modified_time {
            root_node.modified = meta.modified().ok().map(to_local);
        }

        let mut root_frame = self.open(root_node, root, 0);
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            let frame = match stack.last_mut() {
                Some(f) => f,
                None => &mut root_frame,
            };

            if let Some(entry) = frame.pending.next() {
                match self.visit(entry, frame.depth + 1) {
                    Visit::Leaf(node) => {
                        let size = node.size.unwrap_or(0);
                        frame.adopt(node, size);
                    }
                    Visit::Descend(child) => stack.push(child),
                }
                continue;
            }

            let Some(done) = stack.pop() else {
                break;
            };
            let (node, size) = done.finish(self.config.show_size);
            match stack.last_mut() {
                Some(parent) => parent.adopt(node, size),
                None => root_frame.adopt(node, size),
            }
        }

        let (tree, _) = root_frame.finish(self.config.show_size);
        Ok(tree)
    }

    fn visit(&self, entry: Entry, depth: usize) -> Visit {
        let Entry {
            name,
            path,
            entry_type,
        } = entry;

        let mut node = if entry_type.is_dir() {
            Node::directory(name)
        } else {
            Node::file(name)
        };

        if let EntryType::Unknown(source) = entry_type {
            mark_unreadable(&mut node, TreeError::EntryUnreadable { path, source });
            return Visit::Leaf(node);
        }

        if let Err(e) = self.annotate(&mut node, &path) {
            mark_unreadable(&mut node, e);
        }

        if !matches!(entry_type, EntryType::Dir) || node.is_unreadable() {
            return Visit::Leaf(node);
        }
        Visit::Descend(self.open(node, &path, depth))
    }

    /// List a directory into a frame. Unreadable or depth-limited
    /// directories produce a frame with nothing left to visit.
    fn open(&self, mut node: Node, path: &Path, depth: usize) -> Frame {
        if !self.descends_into(depth) {
            let size = if self.config.show_size {
                directory_size(path)
            } else {
                0
            };
            return Frame::closed(node, depth, size);
        }

        match self.read_entries(path) {
            Ok((entries, excluded_size)) => Frame {
                node,
                depth,
                pending: entries.into_iter(),
                total_size: excluded_size,
            },
            Err(e) => {
                mark_unreadable(&mut node, e);
                Frame::closed(node, depth, 0)
            }
        }
    }

    fn descends_into(&self, depth: usize) -> bool {
        self.config.max_depth.is_none_or(|max| depth < max)
    }

    /// Read, filter, and sort a directory's entries. Also returns the size
    /// of the entries that were filtered out, when sizes are shown.
    fn read_entries(&self, path: &Path) -> Result<(Vec<Entry>, u64)> {
        let listing = fs::read_dir(path).map_err(|source| TreeError::EntryUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let mut entries = Vec::new();
        let mut excluded_size = 0u64;

        for dir_entry in listing {
            let dir_entry = match dir_entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("skipping entry in '{}': {}", path.display(), e);
                    continue;
                }
            };

            let name = dir_entry.file_name().to_string_lossy().to_string();
            let entry_path = dir_entry.path();
            let entry_type = EntryType::classify(dir_entry.file_type(), &entry_path);

            if self.is_excluded(&name, &entry_type, &dir_entry) {
                if self.config.show_size {
                    excluded_size += match entry_type {
                        EntryType::Dir => directory_size(&entry_path),
                        _ => dir_entry.metadata().map(|m| m.len()).unwrap_or(0),
                    };
                }
                continue;
            }

            entries.push(Entry {
                name,
                path: entry_path,
                entry_type,
            });
        }

        entries.sort_by(|a, b| {
            compare_entries(&a.name, a.entry_type.is_dir(), &b.name, b.entry_type.is_dir())
        });
        Ok((entries, excluded_size))
    }

    /// Ignore and hidden rules apply to every entry. The files-only rule
    /// never drops an entry whose type could not be read.
    fn is_excluded(&self, name: &str, entry_type: &EntryType, entry: &DirEntry) -> bool {
        if self.ignore.is_ignored(name) {
            return true;
        }
        if matches!(entry_type, EntryType::Other) && !self.config.show_files {
            return true;
        }
        !self.config.show_hidden && is_hidden(name, entry)
    }

    /// Stat the entry for the annotations that are switched on. Directory
    /// sizes are summed from their frames, not read here.
    fn annotate(&self, node: &mut Node, path: &Path) -> Result<()> {
        if !self.config.needs_metadata() {
            return Ok(());
        }

        let meta = fs::symlink_metadata(path).map_err(|source| TreeError::EntryUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        if self.config.show_modified_time {
            node.modified = meta.modified().ok().map(to_local);
        }
        if self.config.show_size && !node.is_dir() {
            node.size = Some(meta.len());
        }
        Ok(())
    }
}

fn mark_unreadable(node: &mut Node, error: TreeError) {
    tracing::warn!("{}", error);
    node.error = Some(error.to_string());
}

/// Display name for the root: its last component, or the last component of
/// its canonical form for paths like `.`.
fn root_name(root: &Path) -> String {
    if let Some(name) = root.file_name() {
        return name.to_string_lossy().to_string();
    }
    root.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| root.display().to_string())
}
