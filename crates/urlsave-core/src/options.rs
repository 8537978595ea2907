//! Download options and the mutator fold that resolves them.
//!
//! Callers pass an ordered list of mutators; each one edits the options in
//! place and may reject its input. The first rejection aborts resolution.

use crate::error::{DownloadError, OptionError};
use crate::fetch::Timeouts;
use std::path::PathBuf;
use std::time::Duration;

/// Base folder used when no mutator sets one.
pub const DEFAULT_BASE_FOLDER: &str = "/tmp";

/// A single option mutator.
pub type OptionFn = Box<dyn FnOnce(&mut Options) -> Result<(), OptionError> + Send>;

/// Resolved configuration for one download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Maximum body size in bytes; 0 means unlimited.
    pub max_size: u64,
    pub base_folder: PathBuf,
    /// Required exact MIME type; empty means unchecked.
    pub mime_type: String,
    /// Accepted MIME groups (the part before `/`); empty means unchecked.
    pub mime_groups: Vec<String>,
    pub connect_timeout: Option<Duration>,
    /// Deadline for the whole transfer (None = no deadline).
    pub timeout: Option<Duration>,
    /// Keep the downloaded file on disk when MIME validation rejects it.
    pub keep_rejected: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_size: 0,
            base_folder: PathBuf::from(DEFAULT_BASE_FOLDER),
            mime_type: String::new(),
            mime_groups: Vec::new(),
            connect_timeout: None,
            timeout: None,
            keep_rejected: false,
        }
    }
}

impl Options {
    pub fn set_max_size(&mut self, size: u64) {
        self.max_size = size;
    }

    pub fn set_base_folder(&mut self, folder: impl Into<PathBuf>) {
        self.base_folder = folder.into();
    }

    pub fn set_mime_type(&mut self, mime: impl Into<String>) {
        self.mime_type = mime.into();
    }

    pub fn set_mime_groups<I, S>(&mut self, groups: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mime_groups = groups.into_iter().map(Into::into).collect();
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: self.connect_timeout,
            total: self.timeout,
        }
    }

    /// True when the validator has anything to check.
    pub fn has_mime_constraints(&self) -> bool {
        !self.mime_type.is_empty() || !self.mime_groups.is_empty()
    }
}

/// Boxes a closure as an [`OptionFn`].
pub fn mutator<F>(f: F) -> OptionFn
where
    F: FnOnce(&mut Options) -> Result<(), OptionError> + Send + 'static,
{
    Box::new(f)
}

/// Applies `mutators` in order to `Options::default()`.
/// Returns the first mutator error unchanged (wrapped as `DownloadError::InvalidOption`).
pub fn resolve_options<I>(mutators: I) -> Result<Options, DownloadError>
where
    I: IntoIterator<Item = OptionFn>,
{
    let mut opts = Options::default();
    for op in mutators {
        op(&mut opts).map_err(DownloadError::InvalidOption)?;
    }
    Ok(opts)
}

pub fn max_size(size: u64) -> OptionFn {
    mutator(move |o| {
        o.set_max_size(size);
        Ok(())
    })
}

pub fn base_folder(folder: impl Into<PathBuf>) -> OptionFn {
    let folder = folder.into();
    mutator(move |o| {
        if folder.as_os_str().is_empty() {
            return Err("base folder must not be empty".into());
        }
        o.set_base_folder(folder);
        Ok(())
    })
}

/// Requires the sniffed type to equal `mime` exactly. An empty string clears the check.
pub fn mime_type(mime: impl Into<String>) -> OptionFn {
    let mime = mime.into();
    mutator(move |o| {
        if !mime.is_empty() && !mime.contains('/') {
            return Err(format!("mime type {:?} is not of the form type/subtype", mime).into());
        }
        o.set_mime_type(mime);
        Ok(())
    })
}

/// Accepts any sniffed type whose group is one of `groups` (e.g. "image", "video").
pub fn mime_groups<I, S>(groups: I) -> OptionFn
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let groups: Vec<String> = groups.into_iter().map(Into::into).collect();
    mutator(move |o| {
        if let Some(bad) = groups.iter().find(|g| g.is_empty() || g.contains('/')) {
            return Err(format!("invalid mime group {:?}", bad).into());
        }
        o.set_mime_groups(groups);
        Ok(())
    })
}

pub fn connect_timeout(d: Duration) -> OptionFn {
    mutator(move |o| {
        o.connect_timeout = Some(d);
        Ok(())
    })
}

pub fn timeout(d: Duration) -> OptionFn {
    mutator(move |o| {
        o.timeout = Some(d);
        Ok(())
    })
}

pub fn keep_rejected(keep: bool) -> OptionFn {
    mutator(move |o| {
        o.keep_rejected = keep;
        Ok(())
    })
}
