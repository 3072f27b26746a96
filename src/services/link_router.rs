// WebShell external link router
// Classifies URLs the renderer must not load itself and hands them to an
// external opener (mail client, dialer, other apps). The opener's side
// effects are its own concern; the router only decides and dispatches.

use log::debug;
use url::Url;

/// Opens a claimed URL in whatever external handler the platform provides.
/// Dispatch internals (deep links, other apps) are outside this core.
pub trait UrlOpener: Send {
    fn open(&self, url: &str);
}

/// Opener that logs and otherwise does nothing. Used in tests and in the
/// console demo, where launching external apps would be noise.
pub struct NoopOpener;

impl UrlOpener for NoopOpener {
    fn open(&self, url: &str) {
        debug!("external url dropped (noop opener): {}", url);
    }
}

/// Trait defining the external link router interface.
pub trait LinkRouterTrait {
    /// Returns whether this URL must be handled outside the renderer.
    fn is_external(&self, url: &str) -> bool;

    /// Claims the URL if external, dispatching it to the opener.
    /// Returns `true` when claimed; the caller must then cancel the
    /// in-renderer navigation.
    fn handle(&self, url: &str) -> bool;
}

/// Router that keeps http(s) and about: navigations in-renderer and claims
/// everything else (mailto:, tel:, custom app schemes).
pub struct LinkRouter {
    opener: Box<dyn UrlOpener>,
}

impl LinkRouter {
    pub fn new(opener: Box<dyn UrlOpener>) -> Self {
        Self { opener }
    }
}

impl LinkRouterTrait for LinkRouter {
    fn is_external(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => !matches!(parsed.scheme(), "http" | "https" | "about"),
            // Scheme-less strings ("about:blank" parses; "foo/bar" does not)
            // are left to the renderer rather than bounced to the platform.
            Err(_) => false,
        }
    }

    fn handle(&self, url: &str) -> bool {
        if !self.is_external(url) {
            return false;
        }
        debug!("routing external url: {}", url);
        self.opener.open(url);
        true
    }
}

/// Opener backed by the platform's default URL handler.
#[cfg(feature = "gui")]
pub struct SystemOpener;

#[cfg(feature = "gui")]
impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) {
        #[cfg(target_os = "linux")]
        let result = std::process::Command::new("xdg-open").arg(url).spawn();
        #[cfg(target_os = "macos")]
        let result = std::process::Command::new("open").arg(url).spawn();
        #[cfg(target_os = "windows")]
        let result = std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .spawn();

        if let Err(e) = result {
            log::warn!("failed to dispatch external url {}: {}", url, e);
        }
    }
}
