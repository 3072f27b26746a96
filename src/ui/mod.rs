//! WebShell UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2 (Chromium-based)
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The layer is a thin adapter: wry callbacks are forwarded to the
//! navigation coordinator's capability traits, and coordinator side effects
//! travel back to the webviews as event-loop user events.

pub mod webview_app;
