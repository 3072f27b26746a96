//! Download manager.
//!
//! In-memory record of transfers routed through the file-save sink. The
//! sink decides destinations before transfer begins and reports completion
//! or failure afterwards; actual byte movement is the renderer's concern.

use uuid::Uuid;

use crate::types::download::{DownloadItem, DownloadStatus};
use crate::types::errors::DownloadError;

/// Trait defining download bookkeeping operations.
pub trait DownloadManagerTrait {
    fn start_download(&mut self, url: &str, destination: &std::path::Path) -> String;
    fn complete_download(&mut self, id: &str) -> Result<(), DownloadError>;
    fn fail_download(&mut self, id: &str, reason: &str) -> Result<(), DownloadError>;
    fn list_downloads(&self) -> Vec<&DownloadItem>;
    fn get_download(&self, id: &str) -> Option<&DownloadItem>;
}

#[derive(Default)]
pub struct DownloadManager {
    downloads: Vec<DownloadItem>,
}

impl DownloadManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_index(&self, id: &str) -> Result<usize, DownloadError> {
        self.downloads
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| DownloadError::NotFound(id.to_string()))
    }
}

impl DownloadManagerTrait for DownloadManager {
    fn start_download(&mut self, url: &str, destination: &std::path::Path) -> String {
        let id = Uuid::new_v4().to_string();
        self.downloads.insert(
            0,
            DownloadItem {
                id: id.clone(),
                url: url.to_string(),
                destination: destination.to_path_buf(),
                status: DownloadStatus::InProgress,
            },
        );
        id
    }

    fn complete_download(&mut self, id: &str) -> Result<(), DownloadError> {
        let idx = self.find_index(id)?;
        self.downloads[idx].status = DownloadStatus::Completed;
        Ok(())
    }

    fn fail_download(&mut self, id: &str, reason: &str) -> Result<(), DownloadError> {
        let idx = self.find_index(id)?;
        self.downloads[idx].status = DownloadStatus::Failed(reason.to_string());
        Ok(())
    }

    fn list_downloads(&self) -> Vec<&DownloadItem> {
        self.downloads.iter().collect()
    }

    fn get_download(&self, id: &str) -> Option<&DownloadItem> {
        self.downloads.iter().find(|d| d.id == id)
    }
}
