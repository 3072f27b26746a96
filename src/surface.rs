//! Render-surface contracts.
//!
//! The coordinator never talks to `wry` directly. It drives surfaces through
//! the [`RenderSurface`] trait and obtains popup surfaces through a
//! [`SurfaceFactory`], so the whole navigation core is testable with
//! recording doubles and the gui layer stays a thin adapter.

use std::sync::Arc;

use uuid::Uuid;

/// Identity of one embedded renderer instance. Surface handles are cheap
/// clones; identity lives in the id, not the handle.
pub type SurfaceId = Uuid;

/// Handle to one embedded renderer instance.
///
/// Exactly one primary surface exists for the app's lifetime; zero or one
/// popup surface exists transiently, owned by the popup session manager.
/// Methods take `&self` so handles can be shared across callbacks; the gui
/// implementation forwards them to the event loop as user events.
pub trait RenderSurface: Send + Sync {
    fn id(&self) -> SurfaceId;

    /// Issues a fresh load of `url` on this surface.
    fn load_url(&self, url: &str);

    /// Evaluates a script in the page context. Errors are absorbed; script
    /// injection is best-effort.
    fn evaluate_script(&self, script: &str);

    /// Stops an active pull-to-refresh spinner, if one is shown.
    fn end_refresh(&self);
}

impl std::fmt::Debug for dyn RenderSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSurface").field("id", &self.id()).finish()
    }
}

/// Dismissible modal container presenting a popup surface.
pub trait PopupContainer: Send {
    fn dismiss(&self);
}

/// A freshly created popup surface plus the container presenting it.
pub struct PopupHandles {
    pub surface: Arc<dyn RenderSurface>,
    pub container: Box<dyn PopupContainer>,
}

/// Creates popup surfaces on demand.
///
/// Returns `None` when the app's foreground UI has no attachable
/// presentation root; the caller drops the request silently.
pub trait SurfaceFactory {
    fn create_popup(&self) -> Option<PopupHandles>;
}
