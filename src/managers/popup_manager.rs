//! Popup session manager.
//!
//! Owns the lifecycle of the secondary, short-lived surface used for
//! out-of-domain authentication flows. The lifecycle is an explicit state
//! machine (`Closed -> Open -> Completing -> Closed`) with owned surface
//! and container state, not a pair of independently nullable fields.

use std::sync::Arc;

use log::{debug, warn};

use crate::surface::{PopupHandles, RenderSurface, SurfaceId};
use crate::types::errors::PopupError;
use crate::types::popup::PopupState;

pub struct PopupSessionManager {
    state: PopupState,
    surface: Option<Arc<dyn RenderSurface>>,
    container: Option<Box<dyn crate::surface::PopupContainer>>,
}

impl Default for PopupSessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupSessionManager {
    pub fn new() -> Self {
        Self {
            state: PopupState::Closed,
            surface: None,
            container: None,
        }
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != PopupState::Closed
    }

    /// Whether `id` identifies the currently open popup surface.
    pub fn is_popup(&self, id: SurfaceId) -> bool {
        self.surface.as_ref().map(|s| s.id()) == Some(id)
    }

    pub fn surface(&self) -> Option<&Arc<dyn RenderSurface>> {
        self.surface.as_ref()
    }

    /// `Closed -> Open`: takes ownership of the popup surface and its
    /// presentation container. One popup at a time; a second request while
    /// open is rejected.
    pub fn open(&mut self, handles: PopupHandles) -> Result<(), PopupError> {
        if self.is_open() {
            warn!("popup requested while one is open; rejecting");
            return Err(PopupError::AlreadyOpen);
        }
        debug!("popup session opened: {}", handles.surface.id());
        self.surface = Some(handles.surface);
        self.container = Some(handles.container);
        self.state = PopupState::Open;
        Ok(())
    }

    /// `Open -> Completing -> Closed`: the single teardown both the
    /// redirect-completion and self-close paths converge on. Dismisses the
    /// presentation container and releases the surface. No-op when closed.
    pub fn complete(&mut self) {
        if self.state != PopupState::Open {
            return;
        }
        self.state = PopupState::Completing;
        if let Some(container) = self.container.take() {
            container.dismiss();
        }
        if let Some(surface) = self.surface.take() {
            debug!("popup session closed: {}", surface.id());
        }
        self.state = PopupState::Closed;
    }
}
