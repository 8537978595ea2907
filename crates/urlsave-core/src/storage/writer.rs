//! Sequential file writer that enforces a byte ceiling.

use crate::error::DownloadError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Result of offering a chunk to a [`BoundedWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The whole chunk was written.
    Accepted,
    /// The chunk went past the ceiling. Bytes up to the ceiling were written,
    /// the rest was dropped.
    Overflow,
}

/// Writes a response body to disk chunk by chunk, never past `limit` bytes.
///
/// A `limit` of 0 means unlimited. Reaching the limit exactly is fine; the
/// first byte beyond it flips the writer into the overflowed state.
pub struct BoundedWriter {
    out: BufWriter<File>,
    path: PathBuf,
    limit: u64,
    written: u64,
    overflowed: bool,
}

impl BoundedWriter {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: &Path, limit: u64) -> Result<Self, DownloadError> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|source| DownloadError::CreateFile {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(BoundedWriter {
            out: BufWriter::new(file),
            path: path.to_path_buf(),
            limit,
            written: 0,
            overflowed: false,
        })
    }

    pub fn write_chunk(&mut self, data: &[u8]) -> Result<WriteOutcome, DownloadError> {
        if self.overflowed {
            return Ok(WriteOutcome::Overflow);
        }
        let (take, outcome) = if self.limit == 0 {
            (data.len(), WriteOutcome::Accepted)
        } else {
            let room = self.limit - self.written;
            if (data.len() as u64) > room {
                (room as usize, WriteOutcome::Overflow)
            } else {
                (data.len(), WriteOutcome::Accepted)
            }
        };
        self.out
            .write_all(&data[..take])
            .map_err(|source| DownloadError::Write {
                path: self.path.clone(),
                source,
            })?;
        self.written += take as u64;
        if outcome == WriteOutcome::Overflow {
            self.overflowed = true;
        }
        Ok(outcome)
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Flushes buffered bytes and closes the file. Returns bytes written.
    pub fn finish(self) -> Result<u64, DownloadError> {
        let written = self.written;
        let path = self.path;
        let mut out = self.out;
        out.flush()
            .map_err(|source| DownloadError::Write { path, source })?;
        Ok(written)
    }
}
