use crate::core::error::Result;
use std::path::PathBuf;

const APP_DIR: &str = "gitcli";
const HISTORY_FILE: &str = "history.txt";

pub fn get_cache_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::home_dir().unwrap_or_default().join(".cache")),
        "macos" => dirs::home_dir().unwrap_or_default().join("Library/Caches"),
        _ => dirs::cache_dir().unwrap_or_default(),
    };

    Ok(base.join(APP_DIR))
}

/// Interactive shell history, created on first save.
pub fn get_history_file() -> Result<PathBuf> {
    let dir = get_cache_directory()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(HISTORY_FILE))
}
