// WebShell platform paths for Windows
// Config:    %APPDATA%/WebShell
// Cache:     %LOCALAPPDATA%/WebShell/cache
// Downloads: %USERPROFILE%/Downloads

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for WebShell on Windows.
/// `%APPDATA%/WebShell`
pub fn get_config_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("WebShell")
}

/// Returns the cache directory for WebShell on Windows.
/// `%LOCALAPPDATA%/WebShell/cache`
pub fn get_cache_dir() -> PathBuf {
    let local_appdata = env::var("LOCALAPPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local"));
    PathBuf::from(local_appdata).join("WebShell").join("cache")
}

/// Returns the downloads directory on Windows.
/// `%USERPROFILE%/Downloads`
pub fn get_downloads_dir() -> PathBuf {
    let profile =
        env::var("USERPROFILE").unwrap_or_else(|_| String::from("C:\\Users\\Default"));
    PathBuf::from(profile).join("Downloads")
}
