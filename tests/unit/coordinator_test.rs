use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use webshell::managers::coordinator::{
    CoordinatorDeps, DownloadHost, NavigationCoordinator, NavigationPolicy, PickerHost, PopupHost,
};
use webshell::managers::picker_bridge::{LibraryItem, NativePickers, SourcePrompt};
use webshell::services::link_router::{LinkRouter, NoopOpener};
use webshell::surface::{PopupContainer, PopupHandles, RenderSurface, SurfaceFactory, SurfaceId};
use webshell::types::config::Config;
use webshell::types::errors::{PickerError, PopupError};
use webshell::types::navigation::{NavigationDecision, ResponseDecision, ResponseMetadata};
use webshell::types::picker::{CapturedMedia, PickerOutcome, PickerSource};
use webshell::types::popup::PopupState;

// ─── Doubles ───

#[derive(Clone)]
struct RecordingSurface {
    id: SurfaceId,
    loads: Arc<Mutex<Vec<String>>>,
    scripts: Arc<Mutex<Vec<String>>>,
    refresh_stops: Arc<Mutex<usize>>,
}

impl RecordingSurface {
    fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            loads: Arc::new(Mutex::new(Vec::new())),
            scripts: Arc::new(Mutex::new(Vec::new())),
            refresh_stops: Arc::new(Mutex::new(0)),
        }
    }

    fn loads(&self) -> Vec<String> {
        self.loads.lock().unwrap().clone()
    }

    fn scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }

    fn refresh_stops(&self) -> usize {
        *self.refresh_stops.lock().unwrap()
    }
}

impl RenderSurface for RecordingSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }
    fn load_url(&self, url: &str) {
        self.loads.lock().unwrap().push(url.to_string());
    }
    fn evaluate_script(&self, script: &str) {
        self.scripts.lock().unwrap().push(script.to_string());
    }
    fn end_refresh(&self) {
        *self.refresh_stops.lock().unwrap() += 1;
    }
}

struct CountingContainer {
    dismissals: Arc<Mutex<usize>>,
}

impl PopupContainer for CountingContainer {
    fn dismiss(&self) {
        *self.dismissals.lock().unwrap() += 1;
    }
}

struct TestFactory {
    popup: RecordingSurface,
    dismissals: Arc<Mutex<usize>>,
    available: bool,
}

impl SurfaceFactory for TestFactory {
    fn create_popup(&self) -> Option<PopupHandles> {
        if !self.available {
            return None;
        }
        Some(PopupHandles {
            surface: Arc::new(self.popup.clone()),
            container: Box::new(CountingContainer {
                dismissals: self.dismissals.clone(),
            }),
        })
    }
}

struct FixedPrompt(Option<PickerSource>);

impl SourcePrompt for FixedPrompt {
    fn choose_source(&self) -> Option<PickerSource> {
        self.0
    }
}

struct PanickingPrompt;

impl SourcePrompt for PanickingPrompt {
    fn choose_source(&self) -> Option<PickerSource> {
        panic!("native UI presented while uploads are disabled");
    }
}

#[derive(Default)]
struct StubPickers {
    capture: Mutex<Option<CapturedMedia>>,
    library: Mutex<Vec<Box<dyn LibraryItem>>>,
    documents: Vec<PathBuf>,
    seen_limit: Arc<Mutex<Option<usize>>>,
}

impl NativePickers for StubPickers {
    fn capture_media(&self) -> Option<CapturedMedia> {
        self.capture.lock().unwrap().take()
    }
    fn pick_library_items(&self, limit: usize) -> Vec<Box<dyn LibraryItem>> {
        *self.seen_limit.lock().unwrap() = Some(limit);
        std::mem::take(&mut *self.library.lock().unwrap())
    }
    fn pick_documents(&self, limit: usize) -> Vec<PathBuf> {
        *self.seen_limit.lock().unwrap() = Some(limit);
        self.documents.clone()
    }
}

/// Library item that blocks in materialize until released, keeping the
/// request outstanding for as long as a test needs.
struct GatedItem {
    gate: Mutex<mpsc::Receiver<()>>,
}

impl LibraryItem for GatedItem {
    fn display_name(&self) -> String {
        "gated.jpg".to_string()
    }
    fn materialize(&self, dest: &std::path::Path) -> Result<(), PickerError> {
        let _ = self.gate.lock().unwrap().recv();
        std::fs::write(dest, b"data")
            .map_err(|e| PickerError::MaterializationFailed(e.to_string()))
    }
}

struct Harness {
    coordinator: NavigationCoordinator,
    primary: RecordingSurface,
    popup: RecordingSurface,
    dismissals: Arc<Mutex<usize>>,
    _scratch: tempfile::TempDir,
}

fn harness_with(config: Config, prompt: Box<dyn SourcePrompt>, pickers: Box<dyn NativePickers>) -> Harness {
    let primary = RecordingSurface::new();
    let popup = RecordingSurface::new();
    let dismissals = Arc::new(Mutex::new(0));
    let scratch = tempfile::tempdir().unwrap();

    let coordinator = NavigationCoordinator::new(
        config,
        Arc::new(primary.clone()),
        CoordinatorDeps {
            router: Box::new(LinkRouter::new(Box::new(NoopOpener))),
            factory: Box::new(TestFactory {
                popup: popup.clone(),
                dismissals: dismissals.clone(),
                available: true,
            }),
            prompt,
            pickers,
            scratch_dir: scratch.path().to_path_buf(),
            downloads_dir: PathBuf::from("/srv/downloads"),
        },
    );

    Harness {
        coordinator,
        primary,
        popup,
        dismissals,
        _scratch: scratch,
    }
}

fn harness(config: Config) -> Harness {
    harness_with(
        config,
        Box::new(FixedPrompt(None)),
        Box::new(StubPickers::default()),
    )
}

// ─── Navigation policy ───

#[test]
fn test_in_host_navigation_is_allowed() {
    let mut h = harness(Config::default());
    let primary_id = h.primary.id();
    let decision = h
        .coordinator
        .decide_navigation(primary_id, "https://app.example.com/inbox");
    assert_eq!(decision, NavigationDecision::Allow);
    assert!(h.primary.loads().is_empty());
}

#[test]
fn test_external_scheme_is_cancelled() {
    let mut h = harness(Config::default());
    let primary_id = h.primary.id();
    let decision = h
        .coordinator
        .decide_navigation(primary_id, "mailto:team@example.com");
    assert_eq!(decision, NavigationDecision::Cancel);
    assert!(h.primary.loads().is_empty());
}

#[test]
fn test_out_of_host_https_stays_in_renderer() {
    let mut h = harness(Config::default());
    let primary_id = h.primary.id();
    // Arbitrary https sites load in-surface on the primary; only scheme
    // classification redirects externally.
    let decision = h
        .coordinator
        .decide_navigation(primary_id, "https://idp.example.com/login");
    assert_eq!(decision, NavigationDecision::Allow);
}

#[test]
fn test_allowed_host_on_primary_is_not_popup_completion() {
    let mut h = harness(Config::default());
    let primary_id = h.primary.id();
    let decision = h
        .coordinator
        .decide_navigation(primary_id, "https://app.example.com/callback");
    assert_eq!(decision, NavigationDecision::Allow);
    assert_eq!(*h.dismissals.lock().unwrap(), 0);
}

// ─── Popup auth round trip ───

#[test]
fn test_popup_completion_scenario() {
    let mut h = harness(Config::default());

    let surface = h
        .coordinator
        .open_popup("https://idp.example.com/login")
        .unwrap();
    assert_eq!(h.popup.loads(), vec!["https://idp.example.com/login"]);
    assert_eq!(h.coordinator.popup_session().state(), PopupState::Open);

    let decision = h
        .coordinator
        .decide_navigation(surface.id(), "https://app.example.com/callback?token=X");
    assert_eq!(decision, NavigationDecision::Cancel);

    // Popup torn down, primary receives exactly one load of the callback.
    assert_eq!(*h.dismissals.lock().unwrap(), 1);
    assert_eq!(h.coordinator.popup_session().state(), PopupState::Closed);
    assert_eq!(
        h.primary.loads(),
        vec!["https://app.example.com/callback?token=X"]
    );
    // The popup itself never navigated past the login page.
    assert_eq!(h.popup.loads(), vec!["https://idp.example.com/login"]);
}

#[test]
fn test_popup_provider_navigation_is_allowed() {
    let mut h = harness(Config::default());
    let surface = h
        .coordinator
        .open_popup("https://idp.example.com/login")
        .unwrap();
    let decision = h
        .coordinator
        .decide_navigation(surface.id(), "https://idp.example.com/2fa");
    assert_eq!(decision, NavigationDecision::Allow);
    assert_eq!(h.coordinator.popup_session().state(), PopupState::Open);
}

#[test]
fn test_second_popup_is_rejected() {
    let mut h = harness(Config::default());
    h.coordinator
        .open_popup("https://idp.example.com/login")
        .unwrap();
    let err = h
        .coordinator
        .open_popup("https://other.example.com/login")
        .unwrap_err();
    assert!(matches!(err, PopupError::AlreadyOpen));
}

#[test]
fn test_popup_without_presentation_root_is_dropped() {
    let primary = RecordingSurface::new();
    let scratch = tempfile::tempdir().unwrap();
    let mut coordinator = NavigationCoordinator::new(
        Config::default(),
        Arc::new(primary.clone()),
        CoordinatorDeps {
            router: Box::new(LinkRouter::new(Box::new(NoopOpener))),
            factory: Box::new(TestFactory {
                popup: RecordingSurface::new(),
                dismissals: Arc::new(Mutex::new(0)),
                available: false,
            }),
            prompt: Box::new(FixedPrompt(None)),
            pickers: Box::new(StubPickers::default()),
            scratch_dir: scratch.path().to_path_buf(),
            downloads_dir: PathBuf::from("/srv/downloads"),
        },
    );

    let err = coordinator
        .open_popup("https://idp.example.com/login")
        .unwrap_err();
    assert!(matches!(err, PopupError::NoPresentationRoot));
    assert_eq!(coordinator.popup_session().state(), PopupState::Closed);
}

#[test]
fn test_popup_self_close_tears_down_without_reload() {
    let mut h = harness(Config::default());
    let surface = h
        .coordinator
        .open_popup("https://idp.example.com/login")
        .unwrap();

    h.coordinator.popup_self_closed(surface.id());
    assert_eq!(*h.dismissals.lock().unwrap(), 1);
    assert_eq!(h.coordinator.popup_session().state(), PopupState::Closed);
    assert!(h.primary.loads().is_empty());
}

#[test]
fn test_self_close_from_unknown_surface_is_ignored() {
    let mut h = harness(Config::default());
    h.coordinator
        .open_popup("https://idp.example.com/login")
        .unwrap();
    h.coordinator.popup_self_closed(uuid::Uuid::new_v4());
    assert_eq!(h.coordinator.popup_session().state(), PopupState::Open);
    assert_eq!(*h.dismissals.lock().unwrap(), 0);
}

// ─── Response policy ───

#[test]
fn test_unrenderable_response_routes_to_download() {
    let mut h = harness(Config::default());
    let primary_id = h.primary.id();
    let meta = ResponseMetadata::new("https://app.example.com/report.pdf", "application/pdf", false);
    assert_eq!(
        h.coordinator.decide_response(primary_id, &meta),
        ResponseDecision::Download
    );
}

#[test]
fn test_renderable_response_is_allowed() {
    let mut h = harness(Config::default());
    let primary_id = h.primary.id();
    let meta = ResponseMetadata::new("https://app.example.com/", "text/html", true);
    assert_eq!(
        h.coordinator.decide_response(primary_id, &meta),
        ResponseDecision::Allow
    );
}

// ─── Load finish ───

#[test]
fn test_finish_load_announces_platform_and_is_repeatable() {
    let mut h = harness(Config::default());
    let primary_id = h.primary.id();

    h.coordinator.finish_load(primary_id);
    h.coordinator.finish_load(primary_id);

    let scripts = h.primary.scripts();
    assert_eq!(scripts.len(), 2);
    assert!(scripts[0].contains("setPlatform"));
    assert_eq!(scripts[0], scripts[1]);
    assert_eq!(h.primary.refresh_stops(), 2);
}

#[test]
fn test_finish_load_skips_refresh_stop_when_disabled() {
    let config = Config {
        pull_to_refresh_enabled: false,
        ..Config::default()
    };
    let mut h = harness(config);
    let primary_id = h.primary.id();

    h.coordinator.finish_load(primary_id);
    assert_eq!(h.primary.refresh_stops(), 0);
    assert_eq!(h.primary.scripts().len(), 1);
}

#[test]
fn test_finish_load_for_unknown_surface_is_dropped() {
    let mut h = harness(Config::default());
    h.coordinator.finish_load(uuid::Uuid::new_v4());
    assert!(h.primary.scripts().is_empty());
}

// ─── File picker host ───

#[test]
fn test_uploads_disabled_resolves_no_selection_without_ui() {
    let config = Config {
        file_uploads_enabled: false,
        ..Config::default()
    };
    // PanickingPrompt proves no native UI is presented.
    let mut h = harness_with(
        config,
        Box::new(PanickingPrompt),
        Box::new(StubPickers::default()),
    );

    let resolution = h.coordinator.request_file_picker(true).unwrap();
    assert_eq!(resolution.wait(), PickerOutcome::NoSelection);
}

#[test]
fn test_prompt_cancel_resolves_no_selection() {
    let mut h = harness_with(
        Config::default(),
        Box::new(FixedPrompt(None)),
        Box::new(StubPickers::default()),
    );
    let resolution = h.coordinator.request_file_picker(false).unwrap();
    assert_eq!(resolution.wait(), PickerOutcome::NoSelection);
}

#[test]
fn test_documents_selection_resolves_paths() {
    let pickers = StubPickers {
        documents: vec![PathBuf::from("/docs/a.txt"), PathBuf::from("/docs/b.txt")],
        ..StubPickers::default()
    };
    let mut h = harness_with(
        Config::default(),
        Box::new(FixedPrompt(Some(PickerSource::Documents))),
        Box::new(pickers),
    );

    let resolution = h.coordinator.request_file_picker(true).unwrap();
    match resolution.wait() {
        PickerOutcome::Selected(files) => {
            assert_eq!(files.len(), 2);
            assert_eq!(files[0].display_name, "a.txt");
        }
        PickerOutcome::NoSelection => panic!("expected files"),
    }
}

#[test]
fn test_multi_select_limited_when_config_disables_it() {
    let seen_limit = Arc::new(Mutex::new(None));
    let pickers = StubPickers {
        documents: vec![PathBuf::from("/docs/a.txt"), PathBuf::from("/docs/b.txt")],
        seen_limit: seen_limit.clone(),
        ..StubPickers::default()
    };
    let config = Config {
        multiple_uploads_enabled: false,
        ..Config::default()
    };
    let mut h = harness_with(
        config,
        Box::new(FixedPrompt(Some(PickerSource::Documents))),
        Box::new(pickers),
    );

    // Caller asks for multiple, config says no: effective limit is 1.
    let resolution = h.coordinator.request_file_picker(true).unwrap();
    assert_eq!(*seen_limit.lock().unwrap(), Some(1));
    match resolution.wait() {
        PickerOutcome::Selected(files) => assert_eq!(files.len(), 1),
        PickerOutcome::NoSelection => panic!("expected one file"),
    }
}

#[test]
fn test_camera_capture_resolves_single_reencoded_photo() {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(4, 4));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();

    let pickers = StubPickers {
        capture: Mutex::new(Some(CapturedMedia::Photo(buf.into_inner()))),
        ..StubPickers::default()
    };
    let mut h = harness_with(
        Config::default(),
        Box::new(FixedPrompt(Some(PickerSource::Camera))),
        Box::new(pickers),
    );

    let resolution = h.coordinator.request_file_picker(false).unwrap();
    match resolution.wait() {
        PickerOutcome::Selected(files) => {
            assert_eq!(files.len(), 1);
            assert_eq!(files[0].path.extension().unwrap(), "jpg");
            assert!(files[0].path.exists());
        }
        PickerOutcome::NoSelection => panic!("expected capture"),
    }
}

#[test]
fn test_camera_cancel_resolves_no_selection() {
    let mut h = harness_with(
        Config::default(),
        Box::new(FixedPrompt(Some(PickerSource::Camera))),
        Box::new(StubPickers::default()),
    );
    let resolution = h.coordinator.request_file_picker(false).unwrap();
    assert_eq!(resolution.wait(), PickerOutcome::NoSelection);
}

#[test]
fn test_second_request_rejected_while_outstanding() {
    let (release, gate) = mpsc::channel();
    let pickers = StubPickers {
        library: Mutex::new(vec![Box::new(GatedItem {
            gate: Mutex::new(gate),
        }) as Box<dyn LibraryItem>]),
        ..StubPickers::default()
    };
    let mut h = harness_with(
        Config::default(),
        Box::new(FixedPrompt(Some(PickerSource::PhotoLibrary))),
        Box::new(pickers),
    );

    let resolution = h.coordinator.request_file_picker(false).unwrap();
    let err = h.coordinator.request_file_picker(false).unwrap_err();
    assert!(matches!(err, PickerError::RequestInFlight));

    // Release the pending materialization; the slot frees up afterwards.
    release.send(()).unwrap();
    match resolution.wait() {
        PickerOutcome::Selected(files) => assert_eq!(files.len(), 1),
        PickerOutcome::NoSelection => panic!("expected gated item"),
    }
    assert!(h.coordinator.request_file_picker(false).is_ok());
}

// ─── Download host ───

#[test]
fn test_download_destination_uses_suggested_name_verbatim() {
    let h = harness(Config::default());
    assert_eq!(
        h.coordinator.download_destination("Report (final).pdf"),
        PathBuf::from("/srv/downloads/Report (final).pdf")
    );
}
