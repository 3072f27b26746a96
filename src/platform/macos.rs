// WebShell platform paths for macOS
// Config:    ~/Library/Application Support/WebShell
// Cache:     ~/Library/Caches/WebShell
// Downloads: ~/Downloads

use std::env;
use std::path::PathBuf;

/// Returns the home directory on macOS.
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory for WebShell on macOS.
/// `~/Library/Application Support/WebShell`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("WebShell")
}

/// Returns the cache directory for WebShell on macOS.
/// `~/Library/Caches/WebShell`
pub fn get_cache_dir() -> PathBuf {
    home_dir().join("Library").join("Caches").join("WebShell")
}

/// Returns the downloads directory on macOS.
/// `~/Downloads`
pub fn get_downloads_dir() -> PathBuf {
    home_dir().join("Downloads")
}
