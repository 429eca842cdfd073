//! Data directory and environment-driven shell options.

use std::path::PathBuf;

use notedb_core::ShellOptions;

/// `NOTEDB_DATA_DIR` if set, otherwise `%LOCALAPPDATA%\notedb`.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("NOTEDB_DATA_DIR") {
        return PathBuf::from(dir);
    }
    std::env::var_os("LOCALAPPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join("notedb")
}

/// Defaults with `NOTEDB_URL`, `NOTEDB_MEMO_URL` and `NOTEDB_DISABLE_MEMO` applied.
pub fn options_from_env() -> ShellOptions {
    let mut options = ShellOptions::default();
    if let Ok(url) = std::env::var("NOTEDB_URL")
        && !url.trim().is_empty()
    {
        options.primary.url = url.trim().to_string();
    }
    if let Ok(url) = std::env::var("NOTEDB_MEMO_URL")
        && !url.trim().is_empty()
    {
        options.memo.url = url.trim().to_string();
    }
    if std::env::var("NOTEDB_DISABLE_MEMO").is_ok_and(|v| v == "1") {
        options.memo_enabled = false;
    }
    options
}
