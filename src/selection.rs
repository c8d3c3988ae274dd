//! Selection sources and the events they deliver to the tracker.

use crate::summary::Summarizer;
use crate::tracker::SelectionTracker;
use crossbeam_channel::Sender;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::debug;

/// Something happened that may change what the panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The host focused a path, or nothing.
    Focus(Option<PathBuf>),
    /// Explicit pick from the path prompt.
    Picked(PathBuf),
    /// Raw clipboard text; only acted on if it looks like an existing path.
    Clipboard(String),
    /// Drop the selection.
    Clear,
}

/// A producer of selection events running on its own thread.
pub trait SelectionSource {
    /// Start delivering events on `tx` until `shutdown` is set.
    fn spawn(self, tx: Sender<SelectionEvent>, shutdown: Arc<AtomicBool>) -> JoinHandle<()>;
}

/// Treat clipboard text as a selection if it looks like a path and exists.
///
/// Text counts as path-like when it starts with `/` or contains `:/`.
pub fn infer_from_clipboard(text: &str) -> Option<PathBuf> {
    let candidate = text.trim();
    if candidate.is_empty() || candidate.contains('\n') {
        return None;
    }
    if !(candidate.starts_with('/') || candidate.contains(":/")) {
        return None;
    }
    let path = Path::new(candidate);
    if path.exists() {
        Some(path.to_path_buf())
    } else {
        None
    }
}

/// Feed one event into the tracker. Returns whether a refresh happened.
pub fn apply_event<S: Summarizer>(tracker: &mut SelectionTracker<S>, event: SelectionEvent) -> bool {
    match event {
        SelectionEvent::Focus(path) => tracker.refresh(path),
        SelectionEvent::Picked(path) => tracker.refresh(Some(path)),
        SelectionEvent::Clear => tracker.refresh(None),
        SelectionEvent::Clipboard(text) => match infer_from_clipboard(&text) {
            Some(path) => tracker.refresh(Some(path)),
            None => {
                debug!("clipboard text is not an existing path, ignored");
                return false;
            }
        },
    }
    true
}
