//! treedraw - draw a directory as a text tree

pub mod drawer;
pub mod error;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use drawer::TreeDrawer;
pub use error::{Result, TreeError};
pub use output::{
    OUTPUT_FILE_NAME, OutputConfig, TreeFormatter, print_json, save_rendering, to_json,
};
pub use tree::{IgnoreSet, NameMatcher, Node, NodeKind, TreeWalker, WalkerConfig};
