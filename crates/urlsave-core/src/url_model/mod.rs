//! Filename derivation for downloaded resources.
//!
//! The local filename comes from the last segment of the URL path,
//! percent-decoded and sanitized for Linux.

mod path;
mod sanitize;

pub use path::last_path_segment;
pub use sanitize::sanitize_filename_for_linux;

use url::Url;

/// Filename used when the URL path yields nothing usable.
pub const DEFAULT_FILENAME: &str = "index.htm";

/// Derives a safe filename for saving the body of `url`.
///
/// Uses the text after the final `/` of the path. A path that ends in `/`, is
/// empty, or sanitizes to nothing (or to `.`/`..`) falls back to
/// [`DEFAULT_FILENAME`].
///
/// # Examples
///
/// - `https://example.com/docs/report.pdf` → `"report.pdf"`
/// - `https://example.com/docs/` → `"index.htm"`
/// - `https://example.com/a/..%2F..%2Fetc%2Fpasswd` → `"_.._etc_passwd"`
pub fn filename_from_url(url: &Url) -> String {
    let raw = match last_path_segment(url) {
        Some(s) => s,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_filename_for_linux(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}
