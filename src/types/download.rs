use std::path::PathBuf;

/// Status of a single transfer routed through the file-save sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    InProgress,
    Completed,
    Failed(String),
}

/// One transfer started by the shell on behalf of the hosted page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadItem {
    pub id: String,
    pub url: String,
    pub destination: PathBuf,
    pub status: DownloadStatus,
}
