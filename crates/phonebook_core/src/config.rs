//! Storage location configuration.
//!
//! # Invariants
//! - An explicit path wins over `PHONEBOOK_DB_PATH`.
//! - Blank values are ignored, never treated as a relative path.

use std::path::{Path, PathBuf};

/// Environment variable naming the storage database file.
pub const DB_PATH_ENV: &str = "PHONEBOOK_DB_PATH";
/// File name used under the temp dir when nothing else is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "phonebook.sqlite3";

/// Resolves the storage database path.
///
/// Order: `explicit`, then `PHONEBOOK_DB_PATH`, then
/// `<temp_dir>/phonebook.sqlite3`.
pub fn resolve_db_path(explicit: Option<&Path>) -> PathBuf {
    resolve_db_path_from(explicit, std::env::var(DB_PATH_ENV).ok().as_deref())
}

fn resolve_db_path_from(explicit: Option<&Path>, env_value: Option<&str>) -> PathBuf {
    if let Some(path) = explicit.filter(|path| !path.as_os_str().is_empty()) {
        return path.to_path_buf();
    }
    if let Some(raw) = env_value {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}
