//! Main event loop: multiplexes selection events, tracker notifications, and keyboard input.

use crate::render::{help_bar_line, prompt_line, rows_to_lines, status_bar_line, RenderConfig};
use crate::selection::{apply_event, SelectionEvent};
use crate::summary::{Summarizer, SummaryRow};
use crate::tracker::SelectionTracker;
use crossbeam_channel::{select, Receiver};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::text::Text;
use ratatui::widgets::{Block, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Shown by the `g` key.
pub const GREETING: &str = "Hello from statpanel!";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Browse,
    /// Typing a path to open.
    Prompt(String),
}

/// What woke the loop up.
enum Wake {
    Changed,
    Selection(Option<SelectionEvent>),
    Input(Event),
    Quit,
    QuitClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Continue,
    Quit,
}

/// Holds mutable state for the application's render loop.
struct AppState<S: Summarizer> {
    tracker: SelectionTracker<S>,
    rows: Vec<SummaryRow>,
    cursor: usize,
    mode: Mode,
    message: Option<String>,
    last_refresh: Option<String>,
    render_config: RenderConfig,
}

impl<S: Summarizer> AppState<S> {
    fn new(tracker: SelectionTracker<S>, render_config: RenderConfig) -> Self {
        Self {
            tracker,
            rows: Vec::new(),
            cursor: 0,
            mode: Mode::Browse,
            message: None,
            last_refresh: None,
            render_config,
        }
    }

    /// Pull fresh rows from the tracker.
    fn reload(&mut self) {
        self.rows = self.tracker.rows();
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        self.last_refresh = Some(chrono::Local::now().format("%H:%M:%S").to_string());
        self.message = None;
    }

    fn current_selection(&self) -> Option<PathBuf> {
        self.tracker.selection().path().map(|p| p.to_path_buf())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::Continue;
        }

        if let Mode::Prompt(ref mut input) = self.mode {
            match key.code {
                KeyCode::Esc => self.mode = Mode::Browse,
                KeyCode::Enter => {
                    let picked = input.trim().to_string();
                    self.mode = Mode::Browse;
                    if !picked.is_empty() {
                        apply_event(&mut self.tracker, SelectionEvent::Picked(PathBuf::from(picked)));
                    }
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                _ => {}
            }
            return Action::Continue;
        }

        match key.code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Action::Quit
            }
            KeyCode::Char('o') => {
                let prefill = self
                    .current_selection()
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_default();
                self.mode = Mode::Prompt(prefill);
            }
            KeyCode::Char('c') => {
                apply_event(&mut self.tracker, SelectionEvent::Clear);
            }
            KeyCode::Char('r') => {
                let current = self.current_selection();
                self.tracker.refresh(current);
            }
            KeyCode::Char('g') => self.message = Some(GREETING.to_string()),
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.rows.len() {
                    self.cursor += 1;
                }
            }
            _ => {}
        }
        Action::Continue
    }

    /// Full path shown in the status bar: the highlighted row's path, or the selection.
    fn focus_path(&self) -> Option<String> {
        self.rows
            .get(self.cursor)
            .and_then(|row| row.path.clone())
            .or_else(|| self.current_selection())
            .map(|p| p.to_string_lossy().to_string())
    }

    fn draw(&self, frame: &mut Frame) {
        let [body, status, footer] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let block = Block::bordered().title(" File Info ");
        let inner_height = block.inner(body).height as usize;
        let offset = self.cursor.saturating_sub(inner_height.saturating_sub(1));

        let lines = rows_to_lines(&self.rows, &self.render_config, Some(self.cursor));
        let para = Paragraph::new(Text::from(lines))
            .block(block)
            .scroll((offset as u16, 0));
        frame.render_widget(para, body);

        let focus = self.focus_path();
        frame.render_widget(
            status_bar_line(
                focus.as_deref(),
                self.rows.len(),
                self.last_refresh.as_deref(),
                self.message.as_deref(),
            ),
            status,
        );

        let bottom = match self.mode {
            Mode::Prompt(ref input) => prompt_line(input),
            Mode::Browse => help_bar_line(),
        };
        frame.render_widget(bottom, footer);
    }
}

/// Run the main application loop. Blocks until the user quits or `quit_rx` fires.
pub fn run<S: Summarizer>(
    mut terminal: DefaultTerminal,
    mut tracker: SelectionTracker<S>,
    render_config: RenderConfig,
    mut selection_rx: Receiver<SelectionEvent>,
    mut quit_rx: Receiver<()>,
) -> io::Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let changed_rx = tracker.subscribe();

    // Spawn keyboard input reader
    let (key_tx, key_rx) = crossbeam_channel::unbounded();
    let shutdown_clone = shutdown.clone();
    let input_handle = thread::spawn(move || {
        while !shutdown_clone.load(Ordering::Relaxed) {
            // Poll with a timeout so we can check the shutdown flag
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    if key_tx.send(evt).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let mut state = AppState::new(tracker, render_config);
    state.reload();
    terminal.draw(|f| state.draw(f))?;

    let result = loop {
        let wake = select! {
            recv(changed_rx) -> msg => match msg {
                Ok(_) => Wake::Changed,
                Err(_) => Wake::Quit,
            },
            recv(selection_rx) -> msg => Wake::Selection(msg.ok()),
            recv(key_rx) -> msg => match msg {
                Ok(evt) => Wake::Input(evt),
                Err(_) => Wake::Quit,
            },
            recv(quit_rx) -> msg => match msg {
                Ok(()) => Wake::Quit,
                Err(_) => Wake::QuitClosed,
            },
        };

        match wake {
            Wake::Changed => state.reload(),
            Wake::Selection(Some(evt)) => {
                debug!(event = ?evt, "selection event");
                // The tracker notifies through `changed_rx`; redraw happens there.
                apply_event(&mut state.tracker, evt);
                continue;
            }
            Wake::Selection(None) => {
                // All sources are gone; keep serving the keyboard.
                selection_rx = crossbeam_channel::never();
                continue;
            }
            Wake::Input(Event::Key(key)) => {
                if state.handle_key(key) == Action::Quit {
                    break Ok(());
                }
            }
            Wake::Input(Event::Resize(_, _)) => {}
            Wake::Input(_) => continue,
            Wake::QuitClosed => {
                quit_rx = crossbeam_channel::never();
                continue;
            }
            Wake::Quit => break Ok(()),
        }

        if let Err(e) = terminal.draw(|f| state.draw(f)) {
            break Err(e);
        }
    };

    // Signal shutdown to input thread and wait
    shutdown.store(true, Ordering::Relaxed);
    let _ = input_handle.join();

    result
}
