#![allow(dead_code)]

use statpanel::render::RenderConfig;
use statpanel::summary::SummaryRow;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// RenderConfig with color disabled.
pub fn no_color_render_config() -> RenderConfig {
    RenderConfig { use_color: false }
}

/// RenderConfig with color enabled.
pub fn color_render_config() -> RenderConfig {
    RenderConfig { use_color: true }
}

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

/// Write `len` bytes to `path`.
pub fn write_sized(path: &Path, len: usize) {
    fs::write(path, vec![b'x'; len]).unwrap();
}

/// Labels of a row list, in order.
pub fn labels(rows: &[SummaryRow]) -> Vec<String> {
    rows.iter().map(|r| r.label.clone()).collect()
}

/// The label of the first row starting with `prefix`, if any.
pub fn find_label<'a>(rows: &'a [SummaryRow], prefix: &str) -> Option<&'a str> {
    rows.iter()
        .map(|r| r.label.as_str())
        .find(|l| l.starts_with(prefix))
}
