//! Bounded single-URL downloads with content-type validation.
//!
//! [`download_file_from_url`] saves the body of a URL to
//! `<base_folder>/<uuid>/<filename>`, rejecting bodies over the configured
//! size and files whose sniffed MIME type is not allowed.

pub mod config;
pub mod logging;

pub mod download;
pub mod error;
pub mod fetch;
pub mod options;
pub mod sniff;
pub mod storage;
pub mod url_model;
pub mod validate;

pub use download::{download_file_from_url, download_with_options};
pub use error::DownloadError;
pub use options::{resolve_options, OptionFn, Options};
