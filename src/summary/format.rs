use chrono::{DateTime, Local};
use std::fs::Metadata;
use std::io;
use std::time::SystemTime;

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Paths longer than this are shortened for description text.
pub const MAX_DESCRIPTION_CHARS: usize = 40;
const KEEP_CHARS: usize = 17;

/// Format a byte count with 1024-based units and one decimal digit.
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} bytes", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else if bytes < GIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GIB as f64)
    }
}

/// Shorten a path for display with a middle ellipsis.
///
/// Anything up to 40 characters is returned as-is; longer input keeps the
/// first and last 17 characters. Counts `char`s so multi-byte names never
/// split inside a code point.
pub fn truncate_path(path: &str) -> String {
    let len = path.chars().count();
    if len <= MAX_DESCRIPTION_CHARS {
        return path.to_string();
    }

    let prefix: String = path.chars().take(KEEP_CHARS).collect();
    let suffix: String = path.chars().skip(len - KEEP_CHARS).collect();

    format!("{prefix}...{suffix}")
}

/// Render a timestamp in local time, or "unavailable" when the platform
/// does not report it.
pub fn format_timestamp(time: io::Result<SystemTime>) -> String {
    match time {
        Ok(t) => DateTime::<Local>::from(t)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => "unavailable".to_string(),
    }
}

/// Permission bits as an octal string (e.g. "755").
#[cfg(unix)]
pub fn format_permissions(meta: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:o}", meta.permissions().mode() & 0o777)
}

/// Permission bits as an octal string. Non-unix platforms only expose the
/// read-only flag.
#[cfg(not(unix))]
pub fn format_permissions(meta: &Metadata) -> String {
    if meta.permissions().readonly() {
        "444".to_string()
    } else {
        "644".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_boundaries() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(1023), "1023 bytes");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(MIB - 1), "1024.0 KB");
        assert_eq!(format_size(MIB), "1.0 MB");
        assert_eq!(format_size(GIB - 1), "1024.0 MB");
        assert_eq!(format_size(GIB), "1.0 GB");
        assert_eq!(format_size(5 * GIB + GIB / 2), "5.5 GB");
    }

    #[test]
    fn truncate_path_short_unchanged() {
        assert_eq!(truncate_path("/tmp/a.txt"), "/tmp/a.txt");
        let exactly_40 = "a".repeat(40);
        assert_eq!(truncate_path(&exactly_40), exactly_40);
    }

    #[test]
    fn truncate_path_long_keeps_ends() {
        let long = "/home/someone/projects/a/very/deeply/nested/file.txt";
        let short = truncate_path(long);
        assert_eq!(short.chars().count(), 17 + 3 + 17);
        assert!(short.starts_with(&long[..17]));
        assert!(short.ends_with(&long[long.len() - 17..]));
        assert_eq!(&short[17..20], "...");
    }

    #[test]
    fn truncate_path_multibyte() {
        let long = "ü".repeat(50);
        let short = truncate_path(&long);
        assert_eq!(short.chars().count(), 37);
        assert!(short.contains("..."));
    }

    #[test]
    fn missing_timestamp_is_unavailable() {
        let err = io::Error::new(io::ErrorKind::Unsupported, "no btime");
        assert_eq!(format_timestamp(Err(err)), "unavailable");
    }

    #[test]
    fn timestamp_has_date_and_time() {
        let text = format_timestamp(Ok(SystemTime::now()));
        assert_eq!(text.len(), "2024-01-01 00:00:00".len());
        assert_eq!(&text[4..5], "-");
        assert_eq!(&text[10..11], " ");
    }
}
