use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Bucket used for files without an extension.
pub const NO_EXTENSION: &str = "no-extension";

/// Per-type tally of a directory's immediate children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionCounts {
    /// Number of child directories.
    pub directories: usize,
    /// Number of child non-directories.
    pub files: usize,
    /// Lower-cased extension (without the dot) to count, in first-seen order.
    pub extensions: Vec<(String, usize)>,
}

impl ExtensionCounts {
    fn add_file(&mut self, ext: String) {
        self.files += 1;
        match self.extensions.iter_mut().find(|(e, _)| *e == ext) {
            Some((_, n)) => *n += 1,
            None => self.extensions.push((ext, 1)),
        }
    }

    /// Count for one extension bucket (0 when absent).
    pub fn get(&self, ext: &str) -> usize {
        self.extensions
            .iter()
            .find(|(e, _)| e == ext)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// The `limit` most frequent buckets, by descending count. Ties keep
    /// first-seen order.
    pub fn top(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .extensions
            .iter()
            .map(|(e, n)| (e.as_str(), *n))
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    /// "txt: 2, md: 1" for the top `limit` buckets, or `None` if there are none.
    pub fn common_types(&self, limit: usize) -> Option<String> {
        let top = self.top(limit);
        if top.is_empty() {
            return None;
        }
        Some(
            top.iter()
                .map(|(ext, n)| format!("{}: {}", ext, n))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Result of a one-level scan of a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildScan {
    /// Listing length, including entries whose stat failed.
    pub items: usize,
    /// Sum of the raw size of every child that could be stat'ed.
    /// Subdirectories contribute their own entry size, not their contents.
    pub approx_size: u64,
    pub counts: ExtensionCounts,
}

/// Scan the immediate children of `dir`. Never descends further.
///
/// Children whose stat fails are counted as items but land in no bucket.
/// Only a failure to list `dir` itself is an error.
///
/// The walk itself does not follow child links (that would trip walkdir's
/// loop detection on links back to `dir`); each child is stat'ed directly,
/// which does follow them.
pub fn scan_children(dir: &Path) -> io::Result<ChildScan> {
    let walker = WalkDir::new(dir)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut scan = ChildScan::default();

    for entry_result in walker {
        match entry_result {
            Ok(entry) => {
                if entry.depth() == 0 {
                    if !fs::metadata(dir)?.is_dir() {
                        return Err(io::Error::new(
                            io::ErrorKind::Other,
                            format!("{}: Not a directory", dir.display()),
                        ));
                    }
                    continue;
                }

                scan.items += 1;
                let meta = match fs::metadata(entry.path()) {
                    Ok(m) => m,
                    Err(e) => {
                        debug!(path = %entry.path().display(), error = %e, "skipping child");
                        continue;
                    }
                };
                scan.approx_size += meta.len();

                if meta.is_dir() {
                    scan.counts.directories += 1;
                } else {
                    scan.counts.add_file(extension_key(entry.path()));
                }
            }
            Err(e) => {
                // Failing to open `dir` itself is a listing failure.
                if e.depth() == 0 || e.path() == Some(dir) {
                    return Err(e.into());
                }
                scan.items += 1;
                debug!(error = %e, "skipping unreadable child");
            }
        }
    }

    Ok(scan)
}

/// Directory/file/extension tally of the immediate children of `dir`.
pub fn count_children(dir: &Path) -> io::Result<ExtensionCounts> {
    scan_children(dir).map(|scan| scan.counts)
}

fn extension_key(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| NO_EXTENSION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn counts(pairs: &[(&str, usize)]) -> ExtensionCounts {
        ExtensionCounts {
            directories: 0,
            files: pairs.iter().map(|(_, n)| n).sum(),
            extensions: pairs.iter().map(|(e, n)| (e.to_string(), *n)).collect(),
        }
    }

    #[test]
    fn top_orders_by_count_then_first_seen() {
        let c = counts(&[("md", 1), ("txt", 2), ("rs", 1), ("toml", 3)]);
        assert_eq!(c.top(3), vec![("toml", 3), ("txt", 2), ("md", 1)]);
    }

    #[test]
    fn common_types_empty_is_none() {
        assert_eq!(ExtensionCounts::default().common_types(3), None);
    }

    #[test]
    fn common_types_joined() {
        let c = counts(&[("txt", 2), ("md", 1)]);
        assert_eq!(c.common_types(3).as_deref(), Some("txt: 2, md: 1"));
    }

    #[test]
    fn extension_key_lowercases_and_strips_dot() {
        assert_eq!(extension_key(&PathBuf::from("A.TXT")), "txt");
        assert_eq!(extension_key(&PathBuf::from("Makefile")), NO_EXTENSION);
        assert_eq!(extension_key(&PathBuf::from(".bashrc")), NO_EXTENSION);
        assert_eq!(extension_key(&PathBuf::from("archive.tar.GZ")), "gz");
    }

    #[test]
    fn add_file_buckets() {
        let mut c = ExtensionCounts::default();
        c.add_file("txt".into());
        c.add_file("md".into());
        c.add_file("txt".into());
        assert_eq!(c.files, 3);
        assert_eq!(c.get("txt"), 2);
        assert_eq!(c.get("md"), 1);
        assert_eq!(c.get("rs"), 0);
    }
}
