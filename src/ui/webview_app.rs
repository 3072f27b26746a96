//! WebView-based shell application using `wry` + `tao`.
//!
//! Architecture:
//! - One primary webview hosts the allowed-host web app for the app's
//!   lifetime; a transient popup window appears for out-of-domain auth.
//! - `with_initialization_script(shell.js)` installs the page bridge on
//!   every load: file-input interception, pull-to-refresh, popup self-close.
//! - IPC from JS → Rust via `window.ipc.postMessage()`.
//! - Coordinator side effects come back as event-loop user events, routed
//!   to the right webview by surface id.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use log::warn;
use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Window, WindowBuilder};
use uuid::Uuid;
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use crate::app::App;
use crate::managers::coordinator::{
    CoordinatorDeps, DownloadHost, NavigationPolicy, PickerHost, PopupHost,
};
use crate::managers::download_manager::DownloadManagerTrait;
use crate::managers::picker_bridge::{LibraryItem, NativePickers, SourcePrompt};
use crate::platform;
use crate::services::config_provider::{ConfigProvider, ConfigProviderTrait};
use crate::services::link_router::{LinkRouter, SystemOpener};
use crate::services::permissions::LoggingPermissionRequester;
use crate::surface::{PopupContainer, PopupHandles, RenderSurface, SurfaceFactory, SurfaceId};
use crate::types::config::Config;
use crate::types::download::DownloadStatus;
use crate::types::errors::PickerError;
use crate::types::navigation::NavigationDecision;
use crate::types::picker::{CapturedMedia, PickerOutcome, PickerSource};

const SHELL_JS: &str = include_str!("../../resources/ui/shell.js");

#[derive(Debug, Clone)]
enum UserEvent {
    LoadUrl(SurfaceId, String),
    EvalScript(SurfaceId, String),
    /// Create the popup window/webview for an already-registered surface id.
    CreatePopup(SurfaceId),
    /// Tear the popup window down (container dismissal).
    ClosePopup,
}

// ─── Surface plumbing ───

/// Render surface backed by the event loop: commands are forwarded as user
/// events and applied to the matching webview on the UI thread.
struct ProxySurface {
    id: SurfaceId,
    proxy: Mutex<EventLoopProxy<UserEvent>>,
}

impl ProxySurface {
    fn new(id: SurfaceId, proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            id,
            proxy: Mutex::new(proxy),
        }
    }

    fn send(&self, event: UserEvent) {
        let _ = self.proxy.lock().unwrap().send_event(event);
    }
}

impl RenderSurface for ProxySurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn load_url(&self, url: &str) {
        self.send(UserEvent::LoadUrl(self.id, url.to_string()));
    }

    fn evaluate_script(&self, script: &str) {
        self.send(UserEvent::EvalScript(self.id, script.to_string()));
    }

    fn end_refresh(&self) {
        self.evaluate_script("if (window.__shellEndRefresh) __shellEndRefresh();");
    }
}

struct ProxyContainer {
    proxy: Mutex<EventLoopProxy<UserEvent>>,
}

impl PopupContainer for ProxyContainer {
    fn dismiss(&self) {
        let _ = self.proxy.lock().unwrap().send_event(UserEvent::ClosePopup);
    }
}

/// Creates popup surfaces by asking the event loop for a new window. When
/// the loop is gone there is no presentation root and creation fails.
struct PopupFactory {
    proxy: EventLoopProxy<UserEvent>,
}

impl SurfaceFactory for PopupFactory {
    fn create_popup(&self) -> Option<PopupHandles> {
        let id = Uuid::new_v4();
        self.proxy.send_event(UserEvent::CreatePopup(id)).ok()?;
        Some(PopupHandles {
            surface: Arc::new(ProxySurface::new(id, self.proxy.clone())),
            container: Box::new(ProxyContainer {
                proxy: Mutex::new(self.proxy.clone()),
            }),
        })
    }
}

// ─── Native pickers (rfd dialogs) ───

struct DialogSourcePrompt;

impl SourcePrompt for DialogSourcePrompt {
    fn choose_source(&self) -> Option<PickerSource> {
        let result = rfd::MessageDialog::new()
            .set_title("Add files")
            .set_description("Choose where to pick files from")
            .set_buttons(rfd::MessageButtons::YesNoCancelCustom(
                "Camera".to_string(),
                "Photo Library".to_string(),
                "Browse Files".to_string(),
            ))
            .show();

        match result {
            rfd::MessageDialogResult::Custom(label) => match label.as_str() {
                "Camera" => Some(PickerSource::Camera),
                "Photo Library" => Some(PickerSource::PhotoLibrary),
                "Browse Files" => Some(PickerSource::Documents),
                _ => None,
            },
            rfd::MessageDialogResult::Yes => Some(PickerSource::Camera),
            rfd::MessageDialogResult::No => Some(PickerSource::PhotoLibrary),
            rfd::MessageDialogResult::Ok => Some(PickerSource::Documents),
            _ => None,
        }
    }
}

/// Library item backed by a file on disk; materialization is a copy into
/// the scratch area on a worker thread.
struct FsLibraryItem {
    source: PathBuf,
}

impl LibraryItem for FsLibraryItem {
    fn display_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "item".to_string())
    }

    fn materialize(&self, dest: &std::path::Path) -> Result<(), PickerError> {
        std::fs::copy(&self.source, dest)
            .map(|_| ())
            .map_err(|e| PickerError::MaterializationFailed(format!(
                "copy {}: {}",
                self.source.display(),
                e
            )))
    }
}

/// Picker sources backed by blocking `rfd` dialogs. Desktops have no
/// in-shell camera device, so the camera source picks an existing image
/// and runs it through the capture re-encode path.
struct DialogPickers;

impl NativePickers for DialogPickers {
    fn capture_media(&self) -> Option<CapturedMedia> {
        let path = rfd::FileDialog::new()
            .set_title("Capture")
            .add_filter("Images", &["jpg", "jpeg", "png"])
            .pick_file()?;
        let bytes = std::fs::read(&path).ok()?;
        Some(CapturedMedia::Photo(bytes))
    }

    fn pick_library_items(&self, limit: usize) -> Vec<Box<dyn LibraryItem>> {
        let dialog = rfd::FileDialog::new()
            .set_title("Photo Library")
            .add_filter("Media", &["jpg", "jpeg", "png", "gif", "webp", "mp4", "mov"]);

        let paths = if limit > 1 {
            dialog.pick_files().unwrap_or_default()
        } else {
            dialog.pick_file().into_iter().collect()
        };

        paths
            .into_iter()
            .take(limit)
            .map(|source| Box::new(FsLibraryItem { source }) as Box<dyn LibraryItem>)
            .collect()
    }

    fn pick_documents(&self, limit: usize) -> Vec<PathBuf> {
        let dialog = rfd::FileDialog::new().set_title("Browse Files");
        if limit > 1 {
            dialog.pick_files().unwrap_or_default()
        } else {
            dialog.pick_file().into_iter().collect()
        }
    }
}

// ─── IPC handler ───

fn handle_ipc(
    state: &Arc<Mutex<App>>,
    surface_id: SurfaceId,
    body: &str,
    proxy: &EventLoopProxy<UserEvent>,
) {
    let Ok(msg) = serde_json::from_str::<serde_json::Value>(body) else {
        return;
    };
    let Some(cmd) = msg.get("cmd").and_then(|v| v.as_str()) else {
        return;
    };

    match cmd {
        "open_file_picker" => {
            let multiple = msg
                .get("multiple")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            let result = {
                let mut s = state.lock().unwrap();
                s.coordinator.request_file_picker(multiple)
            };
            match result {
                Ok(resolution) => {
                    // The resolution may complete on a worker thread; park a
                    // waiter and deliver the result back through the loop.
                    let proxy = proxy.clone();
                    thread::spawn(move || {
                        let paths: Vec<String> = match resolution.wait() {
                            PickerOutcome::Selected(files) => files
                                .iter()
                                .map(|f| f.path.to_string_lossy().to_string())
                                .collect(),
                            PickerOutcome::NoSelection => Vec::new(),
                        };
                        let js = format!(
                            "if (window.__shellFilesPicked) __shellFilesPicked({});",
                            serde_json::json!(paths)
                        );
                        let _ = proxy.send_event(UserEvent::EvalScript(surface_id, js));
                    });
                }
                Err(PickerError::RequestInFlight) => {
                    warn!("file picker request while one is outstanding; ignored");
                }
                Err(e) => warn!("file picker request failed: {}", e),
            }
        }

        "refresh" => {
            let _ = proxy.send_event(UserEvent::EvalScript(
                surface_id,
                "location.reload();".to_string(),
            ));
        }

        "popup_closed" => {
            state.lock().unwrap().coordinator.popup_self_closed(surface_id);
        }

        _ => {}
    }
}

fn build_init_script(config: &Config) -> String {
    format!(
        "window.__SHELL_PTR_ENABLED = {};\n{}",
        config.pull_to_refresh_enabled, SHELL_JS
    )
}

fn suggested_filename(url: &str, dest: &std::path::Path) -> String {
    dest.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .or_else(|| {
            url.rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| "download".to_string())
}

fn build_popup(
    target: &EventLoopWindowTarget<UserEvent>,
    popup_id: SurfaceId,
    state: &Arc<Mutex<App>>,
    proxy: &EventLoopProxy<UserEvent>,
    init_script: &str,
) -> Option<(Window, WebView)> {
    let window = WindowBuilder::new()
        .with_title("Sign in")
        .with_inner_size(LogicalSize::new(480.0, 640.0))
        .build(target)
        .ok()?;

    let nav_state = state.clone();
    let ipc_state = state.clone();
    let ipc_proxy = proxy.clone();
    let load_state = state.clone();

    let builder = WebViewBuilder::new()
        .with_initialization_script(init_script)
        // The popup's navigations re-enter the same coordinator, which is
        // how the allowed-host redirect gets detected.
        .with_navigation_handler(move |url| {
            let mut s = nav_state.lock().unwrap();
            s.coordinator.decide_navigation(popup_id, &url) == NavigationDecision::Allow
        })
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            handle_ipc(&ipc_state, popup_id, msg.body().as_str(), &ipc_proxy);
        })
        .with_on_page_load_handler(move |event, _url| {
            if matches!(event, PageLoadEvent::Finished) {
                load_state.lock().unwrap().coordinator.finish_load(popup_id);
            }
        });

    #[cfg(target_os = "linux")]
    {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox()?;
        let webview = builder.build_gtk(vbox).ok()?;
        Some((window, webview))
    }

    #[cfg(not(target_os = "linux"))]
    {
        let webview = builder.build(&window).ok()?;
        Some((window, webview))
    }
}

// ─── Main entry point ───

pub fn run() {
    let mut provider = ConfigProvider::new(None);
    let config = provider.load().unwrap_or_else(|e| {
        warn!("config load failed ({}); using defaults", e);
        Config::default()
    });

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let primary_id = Uuid::new_v4();
    let primary_surface: Arc<dyn RenderSurface> =
        Arc::new(ProxySurface::new(primary_id, proxy.clone()));

    let deps = CoordinatorDeps {
        router: Box::new(LinkRouter::new(Box::new(SystemOpener))),
        factory: Box::new(PopupFactory {
            proxy: proxy.clone(),
        }),
        prompt: Box::new(DialogSourcePrompt),
        pickers: Box::new(DialogPickers),
        scratch_dir: platform::get_scratch_dir(),
        downloads_dir: platform::get_downloads_dir(),
    };

    let app = App::new(config.clone(), primary_surface, deps);
    let state = Arc::new(Mutex::new(app));

    let window = WindowBuilder::new()
        .with_title("WebShell")
        .with_inner_size(LogicalSize::new(1280.0, 800.0))
        .build(&event_loop)
        .expect("Failed to create window");

    let init_script = build_init_script(&config);

    let nav_state = state.clone();
    let ipc_state = state.clone();
    let ipc_proxy = proxy.clone();
    let load_state = state.clone();
    let nw_state = state.clone();
    let dl_state = state.clone();
    let dc_state = state.clone();

    let builder = WebViewBuilder::new()
        .with_initialization_script(&init_script)
        .with_url("about:blank")
        .with_navigation_handler(move |url| {
            let mut s = nav_state.lock().unwrap();
            s.coordinator.decide_navigation(primary_id, &url) == NavigationDecision::Allow
        })
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            eprintln!("[IPC] {}", body.chars().take(200).collect::<String>());
            handle_ipc(&ipc_state, primary_id, body, &ipc_proxy);
        })
        .with_new_window_req_handler(move |url, _features| {
            eprintln!("[POPUP] {}", url);
            let mut s = nw_state.lock().unwrap();
            // The popup loads in a coordinator-owned window; the renderer's
            // own window target is always denied.
            if let Err(e) = s.coordinator.open_popup(&url) {
                warn!("popup request dropped: {}", e);
            }
            wry::NewWindowResponse::Deny
        })
        .with_on_page_load_handler(move |event, _url| {
            if matches!(event, PageLoadEvent::Finished) {
                load_state.lock().unwrap().coordinator.finish_load(primary_id);
            }
        })
        .with_download_started_handler(move |url: String, dest: &mut PathBuf| {
            let suggested = suggested_filename(&url, dest);
            let mut s = dl_state.lock().unwrap();
            let target = s.coordinator.download_destination(&suggested);
            eprintln!("[DL] {} -> {}", url, target.display());
            s.download_manager.start_download(&url, &target);
            *dest = target;
            true
        })
        .with_download_completed_handler(move |url: String, _path: Option<PathBuf>, success: bool| {
            let mut s = dc_state.lock().unwrap();
            let id = s
                .download_manager
                .list_downloads()
                .iter()
                .find(|d| d.url == url && d.status == DownloadStatus::InProgress)
                .map(|d| d.id.clone());
            if let Some(id) = id {
                let result = if success {
                    s.download_manager.complete_download(&id)
                } else {
                    s.download_manager.fail_download(&id, "transfer failed")
                };
                if let Err(e) = result {
                    warn!("download bookkeeping failed: {}", e);
                }
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().expect("Failed to get GTK vbox");
        builder.build_gtk(vbox).expect("Failed to create WebView")
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window).expect("Failed to create WebView");

    // Queues the initial primary load; delivered once the loop starts.
    state.lock().unwrap().startup(&LoggingPermissionRequester);

    let mut popup: Option<(SurfaceId, Window, WebView)> = None;
    let loop_state = state.clone();
    let loop_proxy = proxy.clone();

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                window_id,
                ..
            } => {
                if popup.as_ref().map(|(_, w, _)| w.id()) == Some(window_id) {
                    // User dismissed an abandoned popup; same teardown as a
                    // page-initiated close.
                    let popup_surface = popup.as_ref().map(|(id, _, _)| *id);
                    if let Some(id) = popup_surface {
                        loop_state.lock().unwrap().coordinator.popup_self_closed(id);
                    }
                } else {
                    *control_flow = ControlFlow::Exit;
                }
            }

            Event::UserEvent(user_event) => match user_event {
                UserEvent::LoadUrl(id, url) => {
                    eprintln!("[LOAD] {} {}", id, url);
                    if id == primary_id {
                        let _ = webview.load_url(&url);
                    } else if popup.as_ref().map(|(pid, _, _)| *pid) == Some(id) {
                        if let Some((_, _, ref wv)) = popup {
                            let _ = wv.load_url(&url);
                        }
                    }
                }
                UserEvent::EvalScript(id, js) => {
                    if id == primary_id {
                        let _ = webview.evaluate_script(&js);
                    } else if popup.as_ref().map(|(pid, _, _)| *pid) == Some(id) {
                        if let Some((_, _, ref wv)) = popup {
                            let _ = wv.evaluate_script(&js);
                        }
                    }
                }
                UserEvent::CreatePopup(popup_id) => {
                    match build_popup(target, popup_id, &loop_state, &loop_proxy, &init_script) {
                        Some((w, wv)) => popup = Some((popup_id, w, wv)),
                        None => warn!("popup window creation failed"),
                    }
                }
                UserEvent::ClosePopup => {
                    popup = None;
                }
            },

            _ => {}
        }
    });
}
