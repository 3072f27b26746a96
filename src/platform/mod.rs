// WebShell platform abstraction
// Provides platform-specific paths and utilities for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for WebShell.
///
/// - **Linux**: `~/.config/webshell` (or `$XDG_CONFIG_HOME/webshell`)
/// - **macOS**: `~/Library/Application Support/WebShell`
/// - **Windows**: `%APPDATA%/WebShell`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific cache directory for WebShell.
///
/// - **Linux**: `~/.cache/webshell` (or `$XDG_CACHE_HOME/webshell`)
/// - **macOS**: `~/Library/Caches/WebShell`
/// - **Windows**: `%LOCALAPPDATA%/WebShell/cache`
pub fn get_cache_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_cache_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_cache_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_cache_dir()
    }
}

/// Returns the writable directory downloads are saved into.
///
/// - **Linux**: `$XDG_DOWNLOAD_DIR` or `~/Downloads`
/// - **macOS**: `~/Downloads`
/// - **Windows**: `%USERPROFILE%/Downloads`
pub fn get_downloads_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_downloads_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_downloads_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_downloads_dir()
    }
}

/// Returns the scratch directory picked files are staged into before being
/// handed to the hosted page. Lives under the cache dir; cleanup is deferred.
pub fn get_scratch_dir() -> PathBuf {
    get_cache_dir().join("picked")
}

/// Platform identity announced to the hosted page after every load.
pub fn platform_name() -> &'static str {
    #[cfg(target_os = "linux")]
    {
        "linux"
    }
    #[cfg(target_os = "macos")]
    {
        "macos"
    }
    #[cfg(target_os = "windows")]
    {
        "windows"
    }
}
