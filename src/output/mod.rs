//! Tree formatting and display
//!
//! - `config` - Output configuration types
//! - `tree` - Connector-drawn text and colored terminal output
//! - `json` - JSON output
//! - `save` - Atomic saving of the text rendering

mod config;
mod json;
mod save;
mod tree;

pub use config::OutputConfig;
pub use json::{print_json, to_json};
pub use save::{OUTPUT_FILE_NAME, save_rendering};
pub use tree::{RenderedLine, TreeFormatter, UNREADABLE_MARKER};
