//! Clipboard polling used to infer a selection from copied paths.

use crate::selection::{infer_from_clipboard, SelectionEvent, SelectionSource};
use anyhow::{bail, Context, Result};
use crossbeam_channel::Sender;
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Known clipboard dump commands, tried in order.
const CANDIDATES: &[(&str, &[&str])] = &[
    ("wl-paste", &["--no-newline"]),
    ("xclip", &["-selection", "clipboard", "-o"]),
    ("xsel", &["--clipboard", "--output"]),
    ("pbpaste", &[]),
    ("powershell", &["-NoProfile", "-Command", "Get-Clipboard"]),
];

/// Abstraction over reading clipboard text so polling can be tested.
pub trait ClipboardReader {
    fn read_text(&mut self) -> Result<String>;
}

/// Reads the clipboard by running an external command.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Pick the first clipboard command available on `PATH`.
    pub fn detect() -> Option<Self> {
        CANDIDATES
            .iter()
            .find(|(program, _)| which::which(program).is_ok())
            .map(|(program, args)| Self::new(*program, args))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ClipboardReader for CommandClipboard {
    fn read_text(&mut self) -> Result<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .with_context(|| format!("failed to run {}", self.program))?;
        if !output.status.success() {
            bail!("{} exited with {}", self.program, output.status);
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Polls a `ClipboardReader` and emits `SelectionEvent::Clipboard` whenever
/// the text changes, or when unchanged text starts naming an existing path.
pub struct ClipboardPoller<R> {
    reader: R,
    interval: Duration,
    /// Previous text and whether it resolved to an existing path.
    last: Option<(String, bool)>,
}

impl<R: ClipboardReader> ClipboardPoller<R> {
    pub fn new(reader: R, interval: Duration) -> Self {
        Self {
            reader,
            interval,
            last: None,
        }
    }

    /// Read once. Returns the text if it differs from the previous read, or if
    /// the same text now resolves to a path that was missing before.
    /// Read failures are logged and treated as "no change".
    pub fn poll(&mut self) -> Option<String> {
        let text = match self.reader.read_text() {
            Ok(t) => t,
            Err(e) => {
                warn!("clipboard read failed: {e:#}");
                return None;
            }
        };
        let resolves = infer_from_clipboard(&text).is_some();
        if let Some((ref prev, prev_resolved)) = self.last {
            if *prev == text && (prev_resolved || !resolves) {
                return None;
            }
        }
        self.last = Some((text.clone(), resolves));
        Some(text)
    }
}

impl<R: ClipboardReader + Send + 'static> SelectionSource for ClipboardPoller<R> {
    fn spawn(mut self, tx: Sender<SelectionEvent>, shutdown: Arc<AtomicBool>) -> JoinHandle<()> {
        thread::spawn(move || {
            let slice = Duration::from_millis(50).min(self.interval);
            while !shutdown.load(Ordering::Relaxed) {
                if let Some(text) = self.poll() {
                    debug!(len = text.len(), "clipboard changed");
                    if tx.send(SelectionEvent::Clipboard(text)).is_err() {
                        break;
                    }
                }
                // Sleep in slices so shutdown stays responsive.
                let mut waited = Duration::ZERO;
                while waited < self.interval && !shutdown.load(Ordering::Relaxed) {
                    thread::sleep(slice);
                    waited += slice;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Result<String>>);

    impl ClipboardReader for Scripted {
        fn read_text(&mut self) -> Result<String> {
            self.0
                .pop_front()
                .unwrap_or_else(|| Ok(String::from("/tmp")))
        }
    }

    fn scripted(items: Vec<Result<String>>) -> Scripted {
        Scripted(items.into_iter().collect())
    }

    #[test]
    fn poll_reports_only_changes() {
        let reader = scripted(vec![
            Ok("a".into()),
            Ok("a".into()),
            Ok("b".into()),
            Ok("a".into()),
        ]);
        let mut poller = ClipboardPoller::new(reader, Duration::from_millis(10));
        assert_eq!(poller.poll().as_deref(), Some("a"));
        assert_eq!(poller.poll(), None);
        assert_eq!(poller.poll().as_deref(), Some("b"));
        assert_eq!(poller.poll().as_deref(), Some("a"));
    }

    #[test]
    fn read_error_is_no_change() {
        let reader = scripted(vec![
            Ok("a".into()),
            Err(anyhow::anyhow!("boom")),
            Ok("a".into()),
        ]);
        let mut poller = ClipboardPoller::new(reader, Duration::from_millis(10));
        assert!(poller.poll().is_some());
        assert_eq!(poller.poll(), None);
        assert_eq!(poller.poll(), None, "error must not reset the last value");
    }

    #[test]
    fn spawned_poller_stops_on_shutdown() {
        let reader = scripted(vec![Ok("/first".into())]);
        let poller = ClipboardPoller::new(reader, Duration::from_millis(10));
        let (tx, rx) = crossbeam_channel::unbounded();
        let shutdown = Arc::new(AtomicBool::new(false));
        let handle = poller.spawn(tx, shutdown.clone());

        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first, SelectionEvent::Clipboard("/first".into()));

        shutdown.store(true, Ordering::Relaxed);
        handle.join().unwrap();
    }

    #[test]
    fn missing_program_is_an_error() {
        let mut clip = CommandClipboard::new("statpanel-no-such-clipboard-tool", &[]);
        assert!(clip.read_text().is_err());
    }
}
