/// Decision returned for a navigation request. Produced per request,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// The renderer proceeds with the navigation itself.
    Allow,
    /// The navigation is stopped; any side effect (popup teardown,
    /// external handoff) has already been performed.
    Cancel,
}

/// Decision returned for a received response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDecision {
    /// Display the response in-surface.
    Allow,
    /// The content type cannot be rendered; route it to the download sink.
    Download,
}

/// Metadata about a received response, as reported by the render surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub url: String,
    pub mime_type: String,
    /// Whether the surface can display this content type itself.
    pub can_show: bool,
}

impl ResponseMetadata {
    pub fn new(url: &str, mime_type: &str, can_show: bool) -> Self {
        Self {
            url: url.to_string(),
            mime_type: mime_type.to_string(),
            can_show,
        }
    }
}
