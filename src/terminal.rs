//! Terminal lifecycle: alternate screen, raw mode, and panic-safe restore.

use ratatui::DefaultTerminal;
use std::io;

/// Enter the alternate screen and raw mode.
///
/// ratatui installs a panic hook that restores the terminal before the
/// panic message is printed.
pub fn init() -> io::Result<DefaultTerminal> {
    ratatui::try_init()
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
pub fn restore() {
    ratatui::restore();
}

