//! Native picker bridge.
//!
//! Produces zero or more local file locations in response to one logical
//! "open files" request, from exactly one of three native sources, and
//! guarantees the outstanding request is resolved exactly once. All failure
//! modes (cancel, permission denial, materialization failure) collapse into
//! `PickerOutcome::NoSelection` on the success channel.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use image::codecs::jpeg::JpegEncoder;
use log::{debug, warn};
use uuid::Uuid;

use crate::types::errors::PickerError;
use crate::types::picker::{CapturedMedia, PickedFile, PickerOutcome, PickerSource};

/// Longest edge a camera photo keeps after re-encode, bounding upload size.
const MAX_CAPTURE_DIM: u32 = 1920;
const CAPTURE_JPEG_QUALITY: u8 = 80;

// ─── Pending request / resolution ───

/// The single in-flight file request.
///
/// Resolution is exactly-once by construction: `resolve` takes the sender
/// out of the slot, so every later call is a no-op that reports `false`.
/// Clones share the slot, letting cancel paths and the materialization
/// collector race safely for the one resolution.
#[derive(Clone)]
pub struct PendingFileRequest {
    slot: Arc<Mutex<Option<mpsc::Sender<PickerOutcome>>>>,
}

/// Receiving side of a file request, held by whoever asked for files.
#[derive(Debug)]
pub struct FileResolution {
    rx: mpsc::Receiver<PickerOutcome>,
}

impl PendingFileRequest {
    /// Creates a linked request/resolution pair.
    pub fn new_pair() -> (Self, FileResolution) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                slot: Arc::new(Mutex::new(Some(tx))),
            },
            FileResolution { rx },
        )
    }

    /// Resolves the request. Returns `false` if it was already resolved.
    pub fn resolve(&self, outcome: PickerOutcome) -> bool {
        let sender = self.slot.lock().unwrap().take();
        match sender {
            Some(tx) => {
                debug!("file request resolved: {:?}", outcome);
                let _ = tx.send(outcome);
                true
            }
            None => false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.lock().unwrap().is_none()
    }
}

impl FileResolution {
    /// Blocks until the request resolves. A request whose last handle was
    /// dropped unresolved reads as `NoSelection` rather than hanging the
    /// calling page forever.
    pub fn wait(self) -> PickerOutcome {
        self.rx.recv().unwrap_or(PickerOutcome::NoSelection)
    }

    /// Non-blocking check, for callers polling from an event loop.
    pub fn try_take(&self) -> Option<PickerOutcome> {
        self.rx.try_recv().ok()
    }
}

// ─── Native source contracts ───

/// One selected photo-library item, materialized asynchronously on a
/// worker thread.
pub trait LibraryItem: Send + 'static {
    fn display_name(&self) -> String;

    /// Copies the item's content to `dest`.
    fn materialize(&self, dest: &Path) -> Result<(), PickerError>;
}

/// The three native sources behind one uniform contract. Implementations
/// present modal UI and block until the user finishes or cancels.
pub trait NativePickers {
    /// Camera capture. `None` on cancel or permission denial.
    fn capture_media(&self) -> Option<CapturedMedia>;

    /// Photo-library selection of up to `limit` items. Empty on cancel.
    fn pick_library_items(&self, limit: usize) -> Vec<Box<dyn LibraryItem>>;

    /// Document browser. Returned paths are already addressable locally.
    fn pick_documents(&self, limit: usize) -> Vec<PathBuf>;
}

/// Source-selection prompt {Camera, Photo Library, Browse Files, Cancel}.
/// Presentation mechanics live outside this core.
pub trait SourcePrompt {
    fn choose_source(&self) -> Option<PickerSource>;
}

// ─── Bridge ───

/// Stages picked files into the scratch area and resolves the outstanding
/// request exactly once.
pub struct PickerBridge {
    scratch_dir: PathBuf,
}

impl PickerBridge {
    pub fn new(scratch_dir: PathBuf) -> Self {
        Self { scratch_dir }
    }

    /// Runs one picker session from the chosen source. Always resolves
    /// `request`, possibly after asynchronous materialization.
    pub fn open(
        &self,
        source: PickerSource,
        limit: usize,
        pickers: &dyn NativePickers,
        request: PendingFileRequest,
    ) {
        if let Err(e) = self.ensure_scratch() {
            warn!("scratch area unavailable: {}", e);
            request.resolve(PickerOutcome::NoSelection);
            return;
        }

        match source {
            PickerSource::Camera => match pickers.capture_media() {
                Some(media) => match self.import_capture(media) {
                    Ok(file) => {
                        request.resolve(PickerOutcome::Selected(vec![file]));
                    }
                    Err(e) => {
                        warn!("camera import failed: {}", e);
                        request.resolve(PickerOutcome::NoSelection);
                    }
                },
                None => {
                    request.resolve(PickerOutcome::NoSelection);
                }
            },
            PickerSource::PhotoLibrary => {
                self.materialize_all(pickers.pick_library_items(limit), request);
            }
            PickerSource::Documents => {
                let files: Vec<PickedFile> = pickers
                    .pick_documents(limit)
                    .into_iter()
                    .take(limit)
                    .map(PickedFile::new)
                    .collect();
                request.resolve(PickerOutcome::from_files(files));
            }
        }
    }

    /// Fans each library item out to a worker thread for materialization
    /// and joins them on a channel. The join is race-free: a single
    /// collector drains all branches and is the only path that resolves.
    pub fn materialize_all(
        &self,
        items: Vec<Box<dyn LibraryItem>>,
        request: PendingFileRequest,
    ) {
        if items.is_empty() {
            request.resolve(PickerOutcome::NoSelection);
            return;
        }

        let total = items.len();
        let (tx, rx) = mpsc::channel::<Option<PickedFile>>();

        for item in items {
            let tx = tx.clone();
            let dest = self.scratch_dir.join(scratch_name(&item.display_name()));
            thread::spawn(move || {
                let staged = match item.materialize(&dest) {
                    Ok(()) => Some(PickedFile {
                        path: dest,
                        display_name: item.display_name(),
                    }),
                    Err(e) => {
                        warn!("library item dropped: {}", e);
                        None
                    }
                };
                let _ = tx.send(staged);
            });
        }
        drop(tx);

        thread::spawn(move || {
            let mut files = Vec::with_capacity(total);
            for _ in 0..total {
                match rx.recv() {
                    Ok(Some(file)) => files.push(file),
                    Ok(None) => {}
                    Err(_) => break,
                }
            }
            // All branches have reported; zero survivors reads as
            // cancellation for the caller.
            request.resolve(PickerOutcome::from_files(files));
        });
    }

    /// Imports captured media into the scratch area. Photos are re-encoded
    /// to a bounded JPEG; videos are copied verbatim.
    pub fn import_capture(&self, media: CapturedMedia) -> Result<PickedFile, PickerError> {
        match media {
            CapturedMedia::Photo(bytes) => {
                let img = image::load_from_memory(&bytes).map_err(|e| {
                    PickerError::MaterializationFailed(format!("decode capture: {}", e))
                })?;
                let img = if img.width() > MAX_CAPTURE_DIM || img.height() > MAX_CAPTURE_DIM {
                    img.thumbnail(MAX_CAPTURE_DIM, MAX_CAPTURE_DIM)
                } else {
                    img
                };

                let dest = self.scratch_dir.join(format!("{}.jpg", Uuid::new_v4()));
                let mut out = fs::File::create(&dest).map_err(|e| {
                    PickerError::ScratchUnavailable(format!("create {}: {}", dest.display(), e))
                })?;
                img.write_with_encoder(JpegEncoder::new_with_quality(
                    &mut out,
                    CAPTURE_JPEG_QUALITY,
                ))
                .map_err(|e| {
                    PickerError::MaterializationFailed(format!("encode capture: {}", e))
                })?;
                Ok(PickedFile::new(dest))
            }
            CapturedMedia::Video(path) => {
                let ext = path
                    .extension()
                    .map(|e| e.to_string_lossy().to_string())
                    .unwrap_or_else(|| "mov".to_string());
                let dest = self.scratch_dir.join(format!("{}.{}", Uuid::new_v4(), ext));
                fs::copy(&path, &dest).map_err(|e| {
                    PickerError::MaterializationFailed(format!(
                        "copy {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(PickedFile::new(dest))
            }
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    fn ensure_scratch(&self) -> Result<(), PickerError> {
        fs::create_dir_all(&self.scratch_dir)
            .map_err(|e| PickerError::ScratchUnavailable(e.to_string()))
    }
}

/// Scratch filename: unique prefix plus a sanitized display name, so two
/// selections of "photo.jpg" never collide.
fn scratch_name(display_name: &str) -> String {
    let safe: String = display_name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}-{}", Uuid::new_v4(), safe)
}
