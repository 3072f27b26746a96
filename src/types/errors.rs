use std::fmt;

// === ConfigError ===

/// Errors related to loading the runtime configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    IoError(String),
    /// The config file exists but could not be parsed.
    SerializationError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::SerializationError(msg) => {
                write!(f, "Config parse error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// === PickerError ===

/// Errors related to native file-picker requests.
#[derive(Debug)]
pub enum PickerError {
    /// A request is already outstanding; pickers are one-at-a-time.
    RequestInFlight,
    /// The chosen source denied access (camera/photo library permission).
    PermissionDenied(String),
    /// A picked item could not be copied into the scratch area.
    MaterializationFailed(String),
    /// The scratch area could not be created or written.
    ScratchUnavailable(String),
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerError::RequestInFlight => {
                write!(f, "A file-picker request is already outstanding")
            }
            PickerError::PermissionDenied(source) => {
                write!(f, "Picker source permission denied: {}", source)
            }
            PickerError::MaterializationFailed(msg) => {
                write!(f, "Picked item materialization failed: {}", msg)
            }
            PickerError::ScratchUnavailable(msg) => {
                write!(f, "Scratch area unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for PickerError {}

// === PopupError ===

/// Errors related to the popup session lifecycle.
#[derive(Debug)]
pub enum PopupError {
    /// A popup is already open; one popup at a time.
    AlreadyOpen,
    /// No attachable presentation root exists; the request is dropped.
    NoPresentationRoot,
}

impl fmt::Display for PopupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopupError::AlreadyOpen => write!(f, "A popup is already open"),
            PopupError::NoPresentationRoot => {
                write!(f, "No presentation root to attach a popup to")
            }
        }
    }
}

impl std::error::Error for PopupError {}

// === DownloadError ===

/// Errors related to download bookkeeping.
#[derive(Debug)]
pub enum DownloadError {
    /// Download with the given ID was not found.
    NotFound(String),
    /// The download directory could not be created.
    FileSystemError(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::NotFound(id) => write!(f, "Download not found: {}", id),
            DownloadError::FileSystemError(msg) => {
                write!(f, "Download file system error: {}", msg)
            }
        }
    }
}

impl std::error::Error for DownloadError {}
