//! MIME allow-list checks for a downloaded file.

use crate::error::DownloadError;
use crate::options::Options;
use crate::sniff;
use std::path::Path;

/// Checks a sniffed type against the exact-type and group constraints.
///
/// Exact type is checked first and fails fast. Groups are only consulted when
/// non-empty; a group `g` accepts any type starting with `"g/"`.
pub fn check_mime(
    actual: &str,
    mime_type: &str,
    mime_groups: &[String],
) -> Result<(), DownloadError> {
    if !mime_type.is_empty() && mime_type != actual {
        return Err(DownloadError::WrongMimeType {
            expected: mime_type.to_string(),
            actual: actual.to_string(),
        });
    }
    if !mime_groups.is_empty() && !in_mime_group(actual, mime_groups) {
        return Err(DownloadError::WrongMimeGroup {
            groups: mime_groups.to_vec(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

fn in_mime_group(actual: &str, groups: &[String]) -> bool {
    groups.iter().any(|g| {
        actual
            .strip_prefix(g.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Sniffs `path` and applies the MIME constraints in `opts`.
///
/// Returns the sniffed type, or `None` when `opts` has no MIME constraints
/// (the file is not read at all in that case).
pub fn validate_file(
    path: &Path,
    opts: &Options,
) -> Result<Option<&'static str>, DownloadError> {
    if !opts.has_mime_constraints() {
        return Ok(None);
    }
    let actual = sniff::sniff_file(path)?;
    tracing::debug!(path = %path.display(), mime = actual, "sniffed content type");
    check_mime(actual, &opts.mime_type, &opts.mime_groups)?;
    Ok(Some(actual))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(g: &[&str]) -> Vec<String> {
        g.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_type() {
        assert!(check_mime("image/png", "image/png", &[]).is_ok());
        assert!(matches!(
            check_mime("image/png", "image/jpeg", &[]),
            Err(DownloadError::WrongMimeType { .. })
        ));
        // Parameters are part of the sniffed string.
        assert!(check_mime("text/plain; charset=utf-8", "text/plain", &[]).is_err());
    }

    #[test]
    fn groups_only() {
        assert!(check_mime("image/png", "", &groups(&["image", "video"])).is_ok());
        assert!(matches!(
            check_mime("image/png", "", &groups(&["text", "audio"])),
            Err(DownloadError::WrongMimeGroup { .. })
        ));
        assert!(check_mime("text/html; charset=utf-8", "", &groups(&["text"])).is_ok());
    }

    #[test]
    fn group_must_match_whole_type() {
        assert!(check_mime("image/png", "", &groups(&["im"])).is_err());
        assert!(check_mime("application/pdf", "", &groups(&["app"])).is_err());
    }

    #[test]
    fn exact_short_circuits_before_groups() {
        match check_mime("image/png", "image/jpeg", &groups(&["text"])) {
            Err(DownloadError::WrongMimeType { expected, actual }) => {
                assert_eq!(expected, "image/jpeg");
                assert_eq!(actual, "image/png");
            }
            other => panic!("expected WrongMimeType, got {:?}", other),
        }
        // Exact passes, groups still apply.
        assert!(matches!(
            check_mime("image/png", "image/png", &groups(&["text"])),
            Err(DownloadError::WrongMimeGroup { .. })
        ));
        assert!(check_mime("image/png", "image/png", &groups(&["image"])).is_ok());
    }

    #[test]
    fn unconstrained_skips_read() {
        let dir = tempfile::tempdir().unwrap();
        // File does not exist; no read must happen.
        let missing = dir.path().join("missing");
        assert_eq!(validate_file(&missing, &Options::default()).unwrap(), None);

        let opts = Options {
            mime_groups: groups(&["image"]),
            ..Options::default()
        };
        assert!(matches!(
            validate_file(&missing, &opts),
            Err(DownloadError::SniffRead { .. })
        ));
    }

    #[test]
    fn validate_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\n\x00\x00").unwrap();
        let opts = Options {
            mime_type: "image/png".into(),
            ..Options::default()
        };
        assert_eq!(validate_file(&path, &opts).unwrap(), Some("image/png"));
    }
}
