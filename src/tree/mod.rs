//! Directory tree walking logic
//!
//! `TreeWalker` lists a root directory depth-first, applies the ignore,
//! hidden, and files-only filters, and builds a `Node` tree annotated with
//! the metadata the configuration asks for.

mod config;
mod filter;
mod node;
mod utils;
mod walker;

pub use config::WalkerConfig;
pub use filter::{ExactMatcher, GlobMatcher, IgnoreSet, NameMatcher, is_hidden};
pub use node::{Node, NodeKind};
pub use utils::{MODIFIED_FORMAT, directory_size, format_modified, format_size};
pub use walker::TreeWalker;
