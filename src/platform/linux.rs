// WebShell platform paths for Linux
// Config:    ~/.config/webshell
// Cache:     ~/.cache/webshell
// Downloads: $XDG_DOWNLOAD_DIR or ~/Downloads

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory for WebShell on Linux.
/// Uses `$XDG_CONFIG_HOME/webshell` if set, otherwise `~/.config/webshell`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("webshell")
    } else {
        home_dir().join(".config").join("webshell")
    }
}

/// Returns the cache directory for WebShell on Linux.
/// Uses `$XDG_CACHE_HOME/webshell` if set, otherwise `~/.cache/webshell`.
pub fn get_cache_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("webshell")
    } else {
        home_dir().join(".cache").join("webshell")
    }
}

/// Returns the downloads directory on Linux.
/// Uses `$XDG_DOWNLOAD_DIR` if set, otherwise `~/Downloads`.
pub fn get_downloads_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DOWNLOAD_DIR") {
        PathBuf::from(xdg)
    } else {
        home_dir().join("Downloads")
    }
}
