//! Helpers shared by the model core and the command-line front end.
//!
//! - URL validation used by both entity factories
//! - String truncation for log output
//! - File system validation for the output directory

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// Parse `raw` as an absolute, network-addressable URL.
///
/// The string must carry a scheme (relative references are rejected by
/// [`Url::parse`]), must be able to act as a base (so `mailto:` and `data:`
/// URLs are out) and must name a non-empty host.
///
/// [`Url::parse`] repairs some malformed input (it trims and drops
/// whitespace, reads `http:host` as `http://host` and treats `\` as `/`).
/// Such strings are rejected here: the raw text may not contain whitespace,
/// control characters or backslashes, and must spell out `scheme://`.
///
/// # Examples
///
/// ```
/// use newsapi_models::utils::parse_absolute_url;
///
/// assert!(parse_absolute_url("http://www.bbc.co.uk/news").is_some());
/// assert!(parse_absolute_url("/news").is_none());
/// assert!(parse_absolute_url("mailto:editor@bbc.co.uk").is_none());
/// assert!(parse_absolute_url(" http://www.bbc.co.uk/news").is_none());
/// ```
pub fn parse_absolute_url(raw: &str) -> Option<Url> {
    if raw
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == '\\')
    {
        return None;
    }
    let parsed = Url::parse(raw).ok()?;
    if parsed.cannot_be_a_base() {
        return None;
    }
    // The parser lowercases the scheme; the separator must be literal.
    let prefix_len = parsed.scheme().len() + "://".len();
    match raw.get(..prefix_len) {
        Some(prefix) if prefix.eq_ignore_ascii_case(&format!("{}://", parsed.scheme())) => {}
        _ => return None,
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Some(parsed),
        _ => None,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary)
/// with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```
/// use newsapi_models::utils::truncate_for_log;
///
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

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a scratch file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;

    // A plain sync create keeps the error surface simple.
    let scratch_path = path.join("..__write_check__");
    stdfs::File::create(&scratch_path)?;
    let _ = stdfs::remove_file(&scratch_path);
    info!("Output directory is writable");
    Ok(())
}
