//! Path summarization: turns a filesystem path into ordered display rows.

mod counts;
mod format;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use counts::{count_children, scan_children, ChildScan, ExtensionCounts, NO_EXTENSION};
pub use format::{format_permissions, format_size, format_timestamp, truncate_path};

/// Label of the single row emitted when the selected path cannot be stat'ed.
pub const STAT_ERROR_LABEL: &str = "Error reading file info";
/// Label of the row that replaces a directory breakdown when listing fails.
pub const LISTING_ERROR_LABEL: &str = "Error reading directory";
/// Placeholder shown when there is neither a selection nor a root.
pub const PLACEHOLDER_LABEL: &str = "No workspace or selection";

/// How many extension buckets the "Common types" row lists.
const COMMON_TYPES_LIMIT: usize = 3;

/// Category tag of a row; drives styling in the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Directory,
    File,
    Info,
    Error,
}

/// One display line of metadata about a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// Primary text.
    pub label: String,
    /// Secondary, muted text.
    pub description: Option<String>,
    /// Full path the row refers to (tooltip / context).
    pub path: Option<PathBuf>,
    pub kind: RowKind,
}

impl SummaryRow {
    pub fn info(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            path: None,
            kind: RowKind::Info,
        }
    }

    pub fn error(label: impl Into<String>) -> Self {
        Self {
            kind: RowKind::Error,
            ..Self::info(label)
        }
    }

    fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn identity(prefix: &str, kind: RowKind, path: &Path) -> Self {
        Self {
            label: format!("{}: {}", prefix, display_name(path)),
            description: Some(truncate_path(&path.to_string_lossy())),
            path: Some(path.to_path_buf()),
            kind,
        }
    }
}

/// Abstraction over summarization so the tracker can be driven by a stub.
pub trait Summarizer {
    fn summarize(&self, path: &Path) -> Vec<SummaryRow>;
    fn summarize_root(&self, root: &Path) -> Vec<SummaryRow>;
}

/// Default `Summarizer` backed by live `stat` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSummarizer;

impl Summarizer for FsSummarizer {
    fn summarize(&self, path: &Path) -> Vec<SummaryRow> {
        summarize_path(path)
    }

    fn summarize_root(&self, root: &Path) -> Vec<SummaryRow> {
        summarize_root(root)
    }
}

/// Summarize `path` into an ordered row list.
///
/// Identity, created, modified and permission rows come first, followed by
/// size and extension for files or the one-level breakdown for directories.
/// A failed stat yields exactly one error row.
pub fn summarize_path(path: &Path) -> Vec<SummaryRow> {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "stat failed");
            return vec![SummaryRow::error(STAT_ERROR_LABEL).with_description(e.to_string())];
        }
    };

    let (prefix, kind) = if meta.is_dir() {
        ("Directory", RowKind::Directory)
    } else if meta.is_file() {
        ("File", RowKind::File)
    } else {
        ("Other", RowKind::Info)
    };

    let mut rows = vec![
        SummaryRow::identity(prefix, kind, path),
        SummaryRow::info(format!("Created: {}", format_timestamp(meta.created()))),
        SummaryRow::info(format!("Modified: {}", format_timestamp(meta.modified()))),
        SummaryRow::info(format!("Permissions: {}", format_permissions(&meta))),
    ];

    if meta.is_file() {
        rows.push(SummaryRow::info(format!("Size: {}", format_size(meta.len()))));
        if let Some(ext) = path.extension().filter(|e| !e.is_empty()) {
            rows.push(SummaryRow::info(format!(
                "Extension: .{}",
                ext.to_string_lossy()
            )));
        }
    } else if meta.is_dir() {
        rows.extend(directory_rows(path));
    }

    rows
}

/// Rows shown for the root context when nothing is selected: identity plus
/// item and type counts, without the common-types row.
pub fn summarize_root(root: &Path) -> Vec<SummaryRow> {
    let mut rows = vec![SummaryRow::identity("Workspace", RowKind::Directory, root)];
    match scan_children(root) {
        Ok(scan) => rows.extend(count_rows(&scan)),
        Err(e) => {
            debug!(path = %root.display(), error = %e, "root listing failed");
            rows.push(SummaryRow::error(LISTING_ERROR_LABEL).with_description(e.to_string()));
        }
    }
    rows
}

fn directory_rows(dir: &Path) -> Vec<SummaryRow> {
    let scan = match scan_children(dir) {
        Ok(scan) => scan,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "listing failed");
            return vec![SummaryRow::error(LISTING_ERROR_LABEL).with_description(e.to_string())];
        }
    };

    let mut rows = vec![SummaryRow::info(format!(
        "Approx. size: {}",
        format_size(scan.approx_size)
    ))
    .with_description("immediate children only")];
    rows.extend(count_rows(&scan));

    if let Some(common) = scan.counts.common_types(COMMON_TYPES_LIMIT) {
        rows.push(SummaryRow::info(format!("Common types: {}", common)));
    }
    rows
}

fn count_rows(scan: &ChildScan) -> Vec<SummaryRow> {
    let mut rows = vec![SummaryRow::info(format!("Items: {}", scan.items))];
    if scan.counts.directories > 0 {
        rows.push(SummaryRow::info(format!(
            "Subdirectories: {}",
            scan.counts.directories
        )));
    }
    if scan.counts.files > 0 {
        rows.push(SummaryRow::info(format!("Files: {}", scan.counts.files)));
    }
    rows
}

/// File name component, falling back to the whole path for roots like "/".
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_of_root_is_whole_path() {
        assert_eq!(display_name(Path::new("/")), "/");
        assert_eq!(display_name(Path::new("/tmp/x.rs")), "x.rs");
    }

    #[test]
    fn error_row_kind() {
        let row = SummaryRow::error(STAT_ERROR_LABEL);
        assert_eq!(row.kind, RowKind::Error);
        assert!(row.path.is_none());
    }

    #[test]
    fn identity_row_truncates_description_only() {
        let long = PathBuf::from("/a/really/long/path/that/goes/on/and/on/forever/name.txt");
        let row = SummaryRow::identity("File", RowKind::File, &long);
        assert_eq!(row.label, "File: name.txt");
        assert_eq!(row.description.as_deref().map(|d| d.chars().count()), Some(37));
        assert_eq!(row.path.as_deref(), Some(long.as_path()));
    }
}
