//! TreeDrawer - walk a directory and draw it

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::output::{OutputConfig, TreeFormatter, save_rendering};
use crate::tree::{Node, TreeWalker, WalkerConfig};

/// Draws the tree of one root directory.
///
/// ```no_run
/// use treedraw::{TreeDrawer, WalkerConfig};
///
/// let drawer = TreeDrawer::new(
///     "src",
///     WalkerConfig {
///         show_files: true,
///         ..Default::default()
///     },
/// );
/// let text = drawer.draw(true, None).unwrap().unwrap_or_default();
/// print!("{}", text);
/// ```
pub struct TreeDrawer {
    path: PathBuf,
    walker: TreeWalker,
    formatter: TreeFormatter,
}

impl TreeDrawer {
    pub fn new(path: impl Into<PathBuf>, config: WalkerConfig) -> Self {
        Self {
            path: path.into(),
            walker: TreeWalker::new(config),
            formatter: TreeFormatter::new(OutputConfig::default()),
        }
    }

    pub fn with_output(mut self, config: OutputConfig) -> Self {
        self.formatter = TreeFormatter::new(config);
        self
    }

    /// Walk the root and return the tree without rendering it.
    pub fn build(&self) -> Result<Node> {
        self.walker.walk(&self.path)
    }

    /// Walk and render the tree.
    ///
    /// When `save_path` is given, the plain rendering is first written to
    /// `tree_structure.txt` in that directory. Then, if `as_string` is set,
    /// the rendering is returned; otherwise it is printed to stdout and
    /// `None` is returned.
    pub fn draw(&self, as_string: bool, save_path: Option<&Path>) -> Result<Option<String>> {
        let tree = self.build()?;
        let text = self.formatter.format(&tree);

        if let Some(dir) = save_path {
            save_rendering(dir, &text)?;
        }

        if as_string {
            return Ok(Some(text));
        }
        self.formatter.print(&tree)?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreeError;
    use crate::output::OUTPUT_FILE_NAME;
    use crate::test_utils::TestTree;

    fn drawer(root: &Path) -> TreeDrawer {
        TreeDrawer::new(
            root,
            WalkerConfig {
                show_files: true,
                ..Default::default()
            },
        )
        .with_output(OutputConfig { use_color: false })
    }

    #[test]
    fn test_draw_as_string() {
        let tree = TestTree::sample();
        let text = drawer(tree.path()).draw(true, None).unwrap().unwrap();
        let lines: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(lines, vec!["├── b/", "│   └── c.txt", "└── a.txt"]);
    }

    #[test]
    fn test_saved_file_matches_string() {
        let tree = TestTree::sample();
        let out = tempfile::tempdir().unwrap();
        let drawer = drawer(tree.path());

        let text = drawer.draw(true, Some(out.path())).unwrap().unwrap();
        let saved = std::fs::read_to_string(out.path().join(OUTPUT_FILE_NAME)).unwrap();
        assert_eq!(saved, text);
    }

    #[test]
    fn test_invalid_root_writes_nothing() {
        let out = tempfile::tempdir().unwrap();
        let drawer = drawer(Path::new("/no/such/tree/root"));

        let err = drawer.draw(true, Some(out.path())).unwrap_err();
        assert!(matches!(err, TreeError::InvalidRoot { .. }));
        assert!(!out.path().join(OUTPUT_FILE_NAME).exists());
    }

    #[test]
    fn test_build_returns_tree() {
        let tree = TestTree::sample();
        let root = drawer(tree.path()).build().unwrap();
        assert_eq!(root.counts(), (1, 2));
    }
}
