#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use statpanel::cli::Args;
use statpanel::clipboard::{ClipboardPoller, CommandClipboard};
use statpanel::logging::{self, LogTarget};
use statpanel::render::{row_to_plain_text, RenderConfig};
use statpanel::selection::{apply_event, SelectionEvent, SelectionSource};
use statpanel::tracker::SelectionTracker;
use statpanel::{event_loop, terminal};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("statpanel: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();

    let log_target = match (&args.log_file, args.print) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Off,
    };
    logging::init(log_target, args.verbose, args.quiet)?;

    let root = match args.root {
        Some(ref root) => {
            let root = root
                .canonicalize()
                .with_context(|| format!("{}: failed to resolve root", root.display()))?;
            anyhow::ensure!(root.is_dir(), "{}: Not a directory", root.display());
            Some(root)
        }
        None => None,
    };

    let mut tracker = SelectionTracker::new(root);
    if let Some(ref path) = args.path {
        apply_event(&mut tracker, SelectionEvent::Focus(Some(path.clone())));
    }

    if args.print {
        let mut stdout = std::io::stdout().lock();
        for row in tracker.rows() {
            writeln!(stdout, "{}", row_to_plain_text(&row))?;
        }
        return Ok(());
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let (selection_tx, selection_rx) = crossbeam_channel::unbounded();

    let poller = if args.clipboard {
        let reader = CommandClipboard::detect().context(
            "--clipboard: no clipboard command found (tried wl-paste, xclip, xsel, pbpaste, powershell)",
        )?;
        info!(
            program = reader.program(),
            interval_ms = args.poll_ms,
            "polling clipboard"
        );
        let poller = ClipboardPoller::new(reader, Duration::from_millis(args.poll_ms));
        Some(poller.spawn(selection_tx.clone(), shutdown.clone()))
    } else {
        None
    };
    drop(selection_tx);

    let (quit_tx, quit_rx) = crossbeam_channel::bounded(1);
    ctrlc::set_handler(move || {
        let _ = quit_tx.try_send(());
    })
    .context("failed to install signal handler")?;

    let render_config = RenderConfig {
        use_color: !args.no_color,
    };

    // Initialize ratatui terminal (alternate screen, raw mode, panic hook)
    let term = terminal::init().context("failed to initialize terminal")?;

    // Run the main event loop (blocks until quit)
    let result = event_loop::run(term, tracker, render_config, selection_rx, quit_rx);

    // Restore terminal state
    terminal::restore();

    shutdown.store(true, Ordering::Relaxed);
    if let Some(handle) = poller {
        let _ = handle.join();
    }

    result.context("event loop failed")
}
