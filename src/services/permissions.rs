// WebShell launch permissions
// The platform request flow itself (system prompts, notification
// registration) lives outside this core; the shell only walks the
// configured permission names through a narrow contract at startup.

use log::{info, warn};

/// Requests one named platform permission. Returns whether it was granted.
pub trait PermissionRequester {
    fn request(&self, name: &str) -> bool;
}

/// Requester that grants nothing and only logs. Denial is a degraded state,
/// never a failure: the affected picker source reports "no selection" and
/// the rest of the shell keeps working.
pub struct LoggingPermissionRequester;

impl PermissionRequester for LoggingPermissionRequester {
    fn request(&self, name: &str) -> bool {
        info!("permission request (no platform backend): {}", name);
        false
    }
}

/// Requests every configured launch permission, logging denials.
pub fn request_on_launch<'a, I>(requester: &dyn PermissionRequester, names: I)
where
    I: IntoIterator<Item = &'a String>,
{
    for name in names {
        if !requester.request(name) {
            warn!("launch permission not granted: {}", name);
        }
    }
}
