//! Linux-safe filename sanitization.

/// Linux NAME_MAX in bytes.
const NAME_MAX: usize = 255;

/// Sanitizes a candidate filename for use as a single path component.
///
/// - Replaces NUL, `/`, `\` and control characters with `_`
/// - Trims leading/trailing dots and whitespace (no hidden files, no `..`)
/// - Truncates to 255 bytes on a char boundary
///
/// Underscores and interior spaces are left alone.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c == '.' || c.is_whitespace());

    let mut take = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
