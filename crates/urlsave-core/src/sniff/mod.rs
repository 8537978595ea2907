//! Content-type sniffing from leading bytes.
//!
//! Classification ignores any declared header and looks only at the first
//! [`SNIFF_LEN`] bytes, following the WHATWG MIME Sniffing algorithm subset
//! used by Go's `http.DetectContentType`.

mod signatures;

use crate::error::DownloadError;
use signatures::SIGNATURES;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Maximum number of bytes inspected.
pub const SNIFF_LEN: usize = 512;

/// Returned when no signature matches.
pub const OCTET_STREAM: &str = "application/octet-stream";

fn is_ws(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0c' | b'\r' | b' ')
}

/// Sniffs the MIME type of `data`. Always returns a valid `type/subtype`
/// (possibly with a charset parameter); unknown binary data is
/// `application/octet-stream`. Empty input is `text/plain; charset=utf-8`.
pub fn detect_content_type(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];
    let first_non_ws = data.iter().position(|&b| !is_ws(b)).unwrap_or(data.len());

    SIGNATURES
        .iter()
        .find_map(|sig| sig.matches(data, first_non_ws))
        .unwrap_or(OCTET_STREAM)
}

/// Reads up to [`SNIFF_LEN`] bytes from the start of `path`.
/// Short files (including empty ones) are not an error.
pub fn read_prefix(path: &Path) -> Result<Vec<u8>, DownloadError> {
    let read_err = |source| DownloadError::SniffRead {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(read_err)?;
    let mut buf = vec![0u8; SNIFF_LEN];
    let mut filled = 0;
    while filled < SNIFF_LEN {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(read_err(e)),
        }
    }
    buf.truncate(filled);
    Ok(buf)
}

/// Sniffs the MIME type of the file at `path`.
pub fn sniff_file(path: &Path) -> Result<&'static str, DownloadError> {
    let prefix = read_prefix(path)?;
    Ok(detect_content_type(&prefix))
}
