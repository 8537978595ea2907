//! Single HTTP GET that streams the body to disk under a byte ceiling.
//!
//! Uses the curl crate (libcurl) Easy handle on the calling thread. The body
//! goes through a [`BoundedWriter`] chunk by chunk, so memory use does not
//! depend on the response size.

use crate::error::DownloadError;
use crate::storage::{BoundedWriter, WriteOutcome};
use std::path::Path;
use std::time::Duration;
use url::Url;

const MAX_REDIRECTIONS: u32 = 10;

/// Optional transfer deadlines. `None` leaves libcurl's default (no limit).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Option<Duration>,
    pub total: Option<Duration>,
}

/// Downloads `url` into `dest`, creating or truncating the file.
///
/// With `max_size == 0` the whole body is written. Otherwise at most
/// `max_size` bytes are written and any further byte fails the call with
/// [`DownloadError::MaxSizeExceeded`]; the partial file is left for the
/// caller to clean up. The HTTP status is not inspected.
///
/// Returns the number of bytes written.
pub fn fetch_to_file(
    url: &Url,
    dest: &Path,
    max_size: u64,
    timeouts: Timeouts,
) -> Result<u64, DownloadError> {
    let mut writer = BoundedWriter::create(dest, max_size)?;

    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str()).map_err(DownloadError::Transport)?;
    easy.follow_location(true).map_err(DownloadError::Transport)?;
    easy.max_redirections(MAX_REDIRECTIONS)
        .map_err(DownloadError::Transport)?;
    if let Some(d) = timeouts.connect {
        easy.connect_timeout(d).map_err(DownloadError::Transport)?;
    }
    if let Some(d) = timeouts.total {
        easy.timeout(d).map_err(DownloadError::Transport)?;
    }

    let mut write_error: Option<DownloadError> = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match writer.write_chunk(data) {
                Ok(WriteOutcome::Accepted) => Ok(data.len()),
                // Short count makes libcurl abort the transfer.
                Ok(WriteOutcome::Overflow) => Ok(0),
                Err(e) => {
                    write_error = Some(e);
                    Ok(0)
                }
            })
            .map_err(DownloadError::Transport)?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(e);
    }
    if writer.overflowed() {
        tracing::debug!(url = %url, limit = max_size, "response exceeded max size");
        return Err(DownloadError::MaxSizeExceeded { limit: max_size });
    }
    performed.map_err(DownloadError::Transport)?;

    if let Ok(code) = easy.response_code() {
        tracing::debug!(url = %url, status = code, "GET finished");
    }

    writer.finish()
}
