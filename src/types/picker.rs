use std::path::PathBuf;

/// Native source a file-picker request can draw from. Chosen by the user
/// through the source-selection prompt; exactly one source per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerSource {
    Camera,
    PhotoLibrary,
    Documents,
}

/// A file produced by a picker source, staged in the scratch area
/// (camera/library) or addressed in place (documents).
///
/// Lifetime is the current picker session; scratch cleanup is deferred and
/// never blocks resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub path: PathBuf,
    /// Name the hosted page should see, independent of the scratch name.
    pub display_name: String,
}

impl PickedFile {
    pub fn new(path: PathBuf) -> Self {
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());
        Self { path, display_name }
    }
}

/// Outcome of one logical "open files" request.
///
/// `Selected` is never empty: when every item fails to materialize or the
/// user dismisses the UI, the outcome is `NoSelection`, so callers can treat
/// "picked nothing usable" exactly like cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Selected(Vec<PickedFile>),
    NoSelection,
}

impl PickerOutcome {
    /// Collapses a result list into a well-formed outcome: an empty list
    /// becomes `NoSelection` rather than an empty `Selected`.
    pub fn from_files(files: Vec<PickedFile>) -> Self {
        if files.is_empty() {
            PickerOutcome::NoSelection
        } else {
            PickerOutcome::Selected(files)
        }
    }

    pub fn is_no_selection(&self) -> bool {
        matches!(self, PickerOutcome::NoSelection)
    }
}

/// Media handed back by the camera source before import into scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedMedia {
    /// Raw encoded image bytes; re-encoded to a bounded JPEG on import.
    Photo(Vec<u8>),
    /// Already-recorded video file, copied into scratch verbatim.
    Video(PathBuf),
}
