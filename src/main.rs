//! WebShell: native shell hosting a single embedded web surface.
//!
//! Entry point: runs the wry/tao shell when built with the `gui` feature.
//! Without it, runs a console walkthrough of the navigation core against
//! print-backed surfaces.

#[cfg(feature = "gui")]
fn main() {
    env_logger::init();
    webshell::ui::webview_app::run();
}

#[cfg(not(feature = "gui"))]
fn main() {
    use std::path::PathBuf;
    use std::sync::Arc;

    use webshell::app::App;
    use webshell::managers::coordinator::{
        CoordinatorDeps, DownloadHost, NavigationPolicy, PopupHost,
    };
    use webshell::managers::picker_bridge::{LibraryItem, NativePickers, SourcePrompt};
    use webshell::services::link_router::{LinkRouter, NoopOpener};
    use webshell::services::permissions::LoggingPermissionRequester;
    use webshell::surface::{
        PopupContainer, PopupHandles, RenderSurface, SurfaceFactory, SurfaceId,
    };
    use webshell::types::config::Config;
    use webshell::types::picker::{CapturedMedia, PickerSource};

    env_logger::init();

    struct PrintSurface {
        id: SurfaceId,
        label: &'static str,
    }

    impl RenderSurface for PrintSurface {
        fn id(&self) -> SurfaceId {
            self.id
        }
        fn load_url(&self, url: &str) {
            println!("  [{}] load {}", self.label, url);
        }
        fn evaluate_script(&self, script: &str) {
            println!("  [{}] eval {}", self.label, script.chars().take(60).collect::<String>());
        }
        fn end_refresh(&self) {
            println!("  [{}] end refresh", self.label);
        }
    }

    struct PrintContainer;
    impl PopupContainer for PrintContainer {
        fn dismiss(&self) {
            println!("  [popup] dismissed");
        }
    }

    struct PrintFactory;
    impl SurfaceFactory for PrintFactory {
        fn create_popup(&self) -> Option<PopupHandles> {
            Some(PopupHandles {
                surface: Arc::new(PrintSurface {
                    id: uuid::Uuid::new_v4(),
                    label: "popup",
                }),
                container: Box::new(PrintContainer),
            })
        }
    }

    struct NoPrompt;
    impl SourcePrompt for NoPrompt {
        fn choose_source(&self) -> Option<PickerSource> {
            None
        }
    }

    struct NoPickers;
    impl NativePickers for NoPickers {
        fn capture_media(&self) -> Option<CapturedMedia> {
            None
        }
        fn pick_library_items(&self, _limit: usize) -> Vec<Box<dyn LibraryItem>> {
            Vec::new()
        }
        fn pick_documents(&self, _limit: usize) -> Vec<PathBuf> {
            Vec::new()
        }
    }

    let config = Config::default();
    let primary: Arc<dyn RenderSurface> = Arc::new(PrintSurface {
        id: uuid::Uuid::new_v4(),
        label: "primary",
    });
    let primary_id = primary.id();

    let mut app = App::new(
        config,
        primary,
        CoordinatorDeps {
            router: Box::new(LinkRouter::new(Box::new(NoopOpener))),
            factory: Box::new(PrintFactory),
            prompt: Box::new(NoPrompt),
            pickers: Box::new(NoPickers),
            scratch_dir: std::env::temp_dir().join("webshell-demo"),
            downloads_dir: std::env::temp_dir(),
        },
    );

    println!("WebShell v{} console walkthrough", env!("CARGO_PKG_VERSION"));
    app.startup(&LoggingPermissionRequester);

    println!("navigate in-host:");
    let d = app
        .coordinator
        .decide_navigation(primary_id, "https://app.example.com/inbox");
    println!("  decision: {:?}", d);

    println!("navigate external:");
    let d = app
        .coordinator
        .decide_navigation(primary_id, "mailto:team@example.com");
    println!("  decision: {:?}", d);

    println!("auth popup round trip:");
    let popup = app
        .coordinator
        .open_popup("https://idp.example.com/login")
        .expect("popup");
    let d = app
        .coordinator
        .decide_navigation(popup.id(), "https://app.example.com/callback?token=x");
    println!("  decision: {:?}", d);

    println!("download destination:");
    println!(
        "  {}",
        app.coordinator.download_destination("report.pdf").display()
    );
}
