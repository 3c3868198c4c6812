//! Utility helpers — path resolution and string manipulation.

use std::path::PathBuf;

/// File name of the session document inside the data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Get the Talkspace data directory (e.g. `~/.talkspace/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".talkspace")
}

/// Get the default session document path (e.g. `~/.talkspace/session.json`).
pub fn get_session_file_path() -> PathBuf {
    get_data_path().join(SESSION_FILE_NAME)
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Expand a leading `~` to the home directory. Other paths pass through.
pub fn expand_home(path: &str) -> PathBuf {
    let Some(home) = dirs_next::home_dir() else {
        return PathBuf::from(path);
    };
    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
