#![forbid(unsafe_code)]
//! statpanel — a terminal side panel that summarizes the selected file or directory.

pub mod cli;
pub mod clipboard;
pub mod event_loop;
pub mod logging;
pub mod render;
pub mod selection;
pub mod summary;
pub mod terminal;
pub mod tracker;
