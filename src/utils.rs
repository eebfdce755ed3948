//! Utility functions for timestamp parsing, log truncation, and output
//! directory validation.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::fs as stdfs;
use std::io::{self, ErrorKind};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Parse a publication timestamp as served by Qiita or Hatena.
///
/// Accepts, in order:
/// - RFC 3339 (`2024-01-01T09:00:00+09:00`, `2024-01-01T00:00:00Z`)
/// - RFC 2822 (`Mon, 01 Jan 2024 09:00:00 +0900`)
/// - a date-time without offset, read as UTC
/// - a bare `YYYY-MM-DD` date, read as UTC midnight
///
/// The source offset is kept so the rendered `date` matches the upstream.
/// Returns `None` when nothing matches.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary at or before `max`
/// bytes, with an ellipsis and the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure an existing directory is writable.
///
/// The directory is never created. Write access is checked by creating and
/// immediately deleting a scratch file inside it.
///
/// # Arguments
///
/// * `path` - The output directory to validate
///
/// # Returns
///
/// `Ok(())` if `path` is an existing, writable directory.
///
/// # Errors
///
/// [`Error::Write`] if the directory is missing, is not a directory, or
/// cannot be written to.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).await.map_err(write_err)?;
    if !metadata.is_dir() {
        return Err(write_err(io::Error::new(
            ErrorKind::NotADirectory,
            "output path is not a directory",
        )));
    }

    let scratch = path.join("..__write_check__");
    match stdfs::File::create(&scratch) {
        Ok(_) => {
            if let Err(e) = stdfs::remove_file(&scratch) {
                warn!(scratch = %scratch.display(), error = %e, "Failed to remove write-check file");
            }
            info!("Output directory is writable");
            Ok(())
        }
        Err(source) => Err(Error::Write {
            path: scratch,
            source,
        }),
    }
}
