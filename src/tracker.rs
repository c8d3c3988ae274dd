//! Current-selection state and lazy row materialization.

use crate::summary::{FsSummarizer, Summarizer, SummaryRow, PLACEHOLDER_LABEL};
use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use tracing::debug;

/// What the panel is currently about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Path(PathBuf),
}

impl Selection {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Selection::None => None,
            Selection::Path(p) => Some(p),
        }
    }
}

/// Sent to subscribers after every `refresh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentChanged;

/// Owns the current selection and produces rows for it on demand.
pub struct SelectionTracker<S: Summarizer = FsSummarizer> {
    selection: Selection,
    root: Option<PathBuf>,
    summarizer: S,
    subscribers: Vec<Sender<ContentChanged>>,
}

impl SelectionTracker<FsSummarizer> {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self::with_summarizer(root, FsSummarizer)
    }
}

impl<S: Summarizer> SelectionTracker<S> {
    pub fn with_summarizer(root: Option<PathBuf>, summarizer: S) -> Self {
        Self {
            selection: Selection::None,
            root,
            summarizer,
            subscribers: Vec::new(),
        }
    }

    /// Receive a `ContentChanged` after every refresh.
    pub fn subscribe(&mut self) -> Receiver<ContentChanged> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Replace the selection (`None` clears it) and notify subscribers.
    /// Rows are not computed here.
    pub fn refresh(&mut self, selection: Option<PathBuf>) {
        self.selection = match selection {
            Some(p) => Selection::Path(p),
            None => Selection::None,
        };
        debug!(selection = ?self.selection, "selection refreshed");
        // Drop subscribers whose receiver has gone away.
        self.subscribers.retain(|tx| tx.send(ContentChanged).is_ok());
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Rows for the current state, recomputed on every call.
    pub fn rows(&self) -> Vec<SummaryRow> {
        match (&self.selection, &self.root) {
            (Selection::Path(p), _) => self.summarizer.summarize(p),
            (Selection::None, Some(root)) => self.summarizer.summarize_root(root),
            (Selection::None, None) => vec![SummaryRow::info(PLACEHOLDER_LABEL)],
        }
    }
}
