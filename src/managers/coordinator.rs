//! Navigation coordinator.
//!
//! Single authority over what the primary and popup surfaces may load, and
//! over bridging renderer-initiated UI requests to native equivalents. The
//! coordinator implements four narrow capability traits (navigation
//! policy, picker host, popup host, download host) so each concern stays
//! independently testable; the gui layer wires renderer callbacks to them.

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info};
use url::Url;

use crate::managers::picker_bridge::{
    FileResolution, NativePickers, PendingFileRequest, PickerBridge, SourcePrompt,
};
use crate::managers::popup_manager::PopupSessionManager;
use crate::platform;
use crate::services::link_router::LinkRouterTrait;
use crate::surface::{RenderSurface, SurfaceFactory, SurfaceId};
use crate::types::config::Config;
use crate::types::errors::{PickerError, PopupError};
use crate::types::navigation::{NavigationDecision, ResponseDecision, ResponseMetadata};
use crate::types::picker::PickerOutcome;

/// Navigation and response policy for every surface the coordinator rules.
pub trait NavigationPolicy {
    fn decide_navigation(&mut self, surface_id: SurfaceId, url: &str) -> NavigationDecision;
    fn decide_response(
        &mut self,
        surface_id: SurfaceId,
        meta: &ResponseMetadata,
    ) -> ResponseDecision;
    fn finish_load(&mut self, surface_id: SurfaceId);
}

/// Bridges renderer file-input events to the native picker bridge.
pub trait PickerHost {
    fn request_file_picker(&mut self, allow_multiple: bool)
        -> Result<FileResolution, PickerError>;
}

/// Owns popup creation and both teardown paths.
pub trait PopupHost {
    fn open_popup(&mut self, target_url: &str) -> Result<Arc<dyn RenderSurface>, PopupError>;
    fn popup_self_closed(&mut self, surface_id: SurfaceId);
}

/// File-save sink: maps a suggested filename to a writable destination.
pub trait DownloadHost {
    fn download_destination(&self, suggested_name: &str) -> PathBuf;
}

/// Collaborators injected at construction. Explicit context passing; the
/// coordinator holds no ambient globals.
pub struct CoordinatorDeps {
    pub router: Box<dyn LinkRouterTrait>,
    pub factory: Box<dyn SurfaceFactory>,
    pub prompt: Box<dyn SourcePrompt>,
    pub pickers: Box<dyn NativePickers>,
    pub scratch_dir: PathBuf,
    pub downloads_dir: PathBuf,
}

pub struct NavigationCoordinator {
    config: Config,
    router: Box<dyn LinkRouterTrait>,
    primary: Arc<dyn RenderSurface>,
    popup: PopupSessionManager,
    factory: Box<dyn SurfaceFactory>,
    prompt: Box<dyn SourcePrompt>,
    pickers: Box<dyn NativePickers>,
    bridge: PickerBridge,
    /// Pickers are modal, but Rust gives no modal guarantee, so the
    /// one-outstanding-request invariant is enforced by this explicit slot.
    pending: Option<PendingFileRequest>,
    downloads_dir: PathBuf,
}

impl NavigationCoordinator {
    pub fn new(config: Config, primary: Arc<dyn RenderSurface>, deps: CoordinatorDeps) -> Self {
        Self {
            config,
            router: deps.router,
            primary,
            popup: PopupSessionManager::new(),
            factory: deps.factory,
            prompt: deps.prompt,
            pickers: deps.pickers,
            bridge: PickerBridge::new(deps.scratch_dir),
            pending: None,
            downloads_dir: deps.downloads_dir,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn primary(&self) -> &Arc<dyn RenderSurface> {
        &self.primary
    }

    pub fn popup_session(&self) -> &PopupSessionManager {
        &self.popup
    }

    fn surface_by_id(&self, id: SurfaceId) -> Option<Arc<dyn RenderSurface>> {
        if self.primary.id() == id {
            Some(self.primary.clone())
        } else if self.popup.is_popup(id) {
            self.popup.surface().cloned()
        } else {
            None
        }
    }

    fn host_of(url: &str) -> Option<String> {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
    }
}

/// One-shot script announcing the host platform to the page. Safe to run on
/// every load: it re-announces when the hook exists and is a no-op otherwise.
pub fn platform_announce_script() -> String {
    format!(
        "if (typeof window.setPlatform === 'function') {{ window.setPlatform('{}'); }}",
        platform::platform_name()
    )
}

impl NavigationPolicy for NavigationCoordinator {
    fn decide_navigation(&mut self, surface_id: SurfaceId, url: &str) -> NavigationDecision {
        // An auth popup navigating back to the allowed host is the
        // completion signal: the provider's own domain is arbitrary, the
        // redirect target is not. Tear the popup down and hand the URL to
        // the primary surface; the popup itself never navigates further.
        if self.popup.is_popup(surface_id)
            && Self::host_of(url).as_deref() == Some(self.config.allowed_host.as_str())
        {
            info!("popup reached allowed host; completing auth");
            self.popup.complete();
            self.primary.load_url(url);
            return NavigationDecision::Cancel;
        }

        if self.router.handle(url) {
            return NavigationDecision::Cancel;
        }

        NavigationDecision::Allow
    }

    fn decide_response(
        &mut self,
        _surface_id: SurfaceId,
        meta: &ResponseMetadata,
    ) -> ResponseDecision {
        if meta.can_show {
            ResponseDecision::Allow
        } else {
            debug!("unrenderable response {} ({})", meta.url, meta.mime_type);
            ResponseDecision::Download
        }
    }

    fn finish_load(&mut self, surface_id: SurfaceId) {
        let Some(surface) = self.surface_by_id(surface_id) else {
            return;
        };
        if self.config.pull_to_refresh_enabled {
            surface.end_refresh();
        }
        surface.evaluate_script(&platform_announce_script());
    }
}

impl PickerHost for NavigationCoordinator {
    fn request_file_picker(
        &mut self,
        allow_multiple: bool,
    ) -> Result<FileResolution, PickerError> {
        // A resolved slot is stale, not outstanding.
        if self.pending.as_ref().is_some_and(|p| p.is_resolved()) {
            self.pending = None;
        }
        if self.pending.is_some() {
            return Err(PickerError::RequestInFlight);
        }

        let (request, resolution) = PendingFileRequest::new_pair();

        if !self.config.file_uploads_enabled {
            // No native UI at all; the page just sees nothing picked.
            request.resolve(PickerOutcome::NoSelection);
            return Ok(resolution);
        }

        self.pending = Some(request.clone());
        match self.prompt.choose_source() {
            Some(source) => {
                let limit = self.config.selection_limit(allow_multiple);
                self.bridge
                    .open(source, limit, self.pickers.as_ref(), request);
            }
            None => {
                request.resolve(PickerOutcome::NoSelection);
            }
        }
        Ok(resolution)
    }
}

impl PopupHost for NavigationCoordinator {
    fn open_popup(&mut self, target_url: &str) -> Result<Arc<dyn RenderSurface>, PopupError> {
        if self.popup.is_open() {
            return Err(PopupError::AlreadyOpen);
        }
        let handles = self
            .factory
            .create_popup()
            .ok_or(PopupError::NoPresentationRoot)?;
        let surface = handles.surface.clone();
        self.popup.open(handles)?;
        info!("popup opened for {}", target_url);
        surface.load_url(target_url);
        Ok(surface)
    }

    fn popup_self_closed(&mut self, surface_id: SurfaceId) {
        // Same teardown as the redirect path, minus the primary reload.
        if self.popup.is_popup(surface_id) {
            info!("popup closed itself");
            self.popup.complete();
        }
    }
}

impl DownloadHost for NavigationCoordinator {
    fn download_destination(&self, suggested_name: &str) -> PathBuf {
        // Filename taken verbatim from the suggestion; collisions are the
        // platform's problem.
        self.downloads_dir.join(suggested_name)
    }
}
