use clap::Parser;
use std::path::PathBuf;

/// Lowest accepted clipboard poll interval.
pub const MIN_POLL_MS: u64 = 250;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "statpanel",
    version,
    about = "Side panel showing metadata about the selected file or directory",
    after_help = "Examples:\n  statpanel Cargo.toml\n  statpanel --root . --clipboard\n  statpanel --print src/"
)]
pub struct Args {
    /// Initially selected file or directory
    pub path: Option<PathBuf>,

    /// Workspace root shown when nothing is selected
    #[arg(short = 'r', long = "root")]
    pub root: Option<PathBuf>,

    /// Infer the selection from paths copied to the clipboard
    #[arg(long = "clipboard")]
    pub clipboard: bool,

    /// Clipboard poll interval in milliseconds (minimum 250)
    #[arg(long = "poll", default_value = "1000")]
    pub poll_ms: u64,

    /// Print the rows once and exit instead of opening the panel
    #[arg(long = "print")]
    pub print: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Write logs to this file (the panel owns the terminal)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.poll_ms < MIN_POLL_MS {
            self.poll_ms = MIN_POLL_MS;
        }
        if self.quiet {
            self.verbose = 0;
        }
        // Respect NO_COLOR env var
        if std::env::var("NO_COLOR").is_ok() {
            self.no_color = true;
        }
        self
    }
}
