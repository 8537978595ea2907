//! Path segment extraction from a parsed URL.

use url::Url;

/// Returns the percent-decoded text after the final `/` of the URL path.
///
/// Returns `None` when that text is empty (root path or trailing slash).
/// Invalid UTF-8 escapes are decoded lossily.
pub fn last_path_segment(url: &Url) -> Option<String> {
    let segment = url.path().rsplit('/').next().unwrap_or("");
    if segment.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode_binary(segment.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded).trim().to_string();
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}
