//! Shared utility functions for tree walking and display

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Timestamp layout used for `[Modified: ...]` annotations.
pub const MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

pub fn format_modified(modified: &DateTime<Local>) -> String {
    modified.format(MODIFIED_FORMAT).to_string()
}

pub fn to_local(time: SystemTime) -> DateTime<Local> {
    DateTime::<Local>::from(time)
}

/// Sibling order: directories before files, then case-insensitive name,
/// then exact name so the order is total.
pub fn compare_entries(a_name: &str, a_is_dir: bool, b_name: &str, b_is_dir: bool) -> Ordering {
    b_is_dir
        .cmp(&a_is_dir)
        .then_with(|| a_name.to_lowercase().cmp(&b_name.to_lowercase()))
        .then_with(|| a_name.cmp(b_name))
}

/// Total length of every non-directory entry beneath `path`, ignoring filters.
/// Symlinks are counted by their own length and never followed; unreadable
/// entries are skipped.
pub fn directory_size(path: &Path) -> u64 {
    let mut total = 0u64;
    let mut pending: Vec<PathBuf> = vec![path.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("skipping '{}' in size total: {}", dir.display(), e);
                continue;
            }
        };

        for entry in entries.filter_map(|e| e.ok()) {
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => pending.push(entry.path()),
                Ok(_) => match entry.metadata() {
                    Ok(meta) => total += meta.len(),
                    Err(e) => {
                        tracing::debug!(
                            "skipping '{}' in size total: {}",
                            entry.path().display(),
                            e
                        );
                    }
                },
                Err(_) => {}
            }
        }
    }

    total
}
