//! Error types for treedraw
//!
//! Everything fallible in the library returns [`Result<T>`], an alias for
//! `Result<T, TreeError>`.

use std::io;
use std::path::PathBuf;

/// Errors produced while walking, rendering, or saving a tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The root path is missing or is not a directory. Fatal.
    #[error("invalid root '{}': {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// A single entry could not be read. The walk records this on the
    /// entry's node and keeps going.
    #[error("cannot read '{}': {source}", path.display())]
    EntryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The saved rendering could not be written.
    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, TreeError>;
