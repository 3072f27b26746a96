//! App Core for WebShell.
//!
//! Composition root: builds the navigation coordinator from its injected
//! collaborators and runs the startup sequence. The config snapshot is
//! constructed once and passed down explicitly; nothing reads it ambiently.

use std::sync::Arc;

use crate::managers::coordinator::{CoordinatorDeps, NavigationCoordinator};
use crate::managers::download_manager::DownloadManager;
use crate::services::permissions::{self, PermissionRequester};
use crate::surface::RenderSurface;
use crate::types::config::Config;

pub struct App {
    pub config: Config,
    pub coordinator: NavigationCoordinator,
    pub download_manager: DownloadManager,
}

impl App {
    /// Creates the app around an existing primary surface. The coordinator
    /// takes the config by value; `App.config` keeps a copy for the shell.
    pub fn new(config: Config, primary: Arc<dyn RenderSurface>, deps: CoordinatorDeps) -> Self {
        let coordinator = NavigationCoordinator::new(config.clone(), primary, deps);
        Self {
            config,
            coordinator,
            download_manager: DownloadManager::new(),
        }
    }

    /// Startup sequence: request configured launch permissions, then point
    /// the primary surface at the start URL.
    pub fn startup(&self, requester: &dyn PermissionRequester) {
        permissions::request_on_launch(requester, &self.config.permissions_on_launch);
        self.coordinator.primary().load_url(&self.config.start_url);
    }
}
