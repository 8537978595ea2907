//! The download pipeline: resolve options, allocate a destination, fetch
//! under the size ceiling, then validate the content type.

use crate::error::DownloadError;
use crate::fetch;
use crate::options::{self, OptionFn, Options};
use crate::storage::Destination;
use crate::url_model;
use crate::validate;
use std::path::PathBuf;
use url::Url;

/// Downloads `url` into `<base_folder>/<uuid>/<filename>` and returns the file path.
///
/// `mutators` are applied in order to the default [`Options`]; the first
/// failing mutator aborts before anything touches the filesystem.
pub fn download_file_from_url<I>(url: &Url, mutators: I) -> Result<PathBuf, DownloadError>
where
    I: IntoIterator<Item = OptionFn>,
{
    let opts = options::resolve_options(mutators)?;
    download_with_options(url, &opts)
}

/// Same as [`download_file_from_url`] with already-resolved options.
///
/// On a fetch failure the allocated directory is removed. On a MIME rejection
/// it is removed too unless `opts.keep_rejected` is set. A failed sniff read
/// always removes it.
pub fn download_with_options(url: &Url, opts: &Options) -> Result<PathBuf, DownloadError> {
    let filename = url_model::filename_from_url(url);
    let dest = Destination::allocate(&opts.base_folder, &filename)?;

    let written = match fetch::fetch_to_file(url, dest.file(), opts.max_size, opts.timeouts()) {
        Ok(n) => n,
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "fetch failed, removing download directory");
            dest.remove();
            return Err(e);
        }
    };

    if let Err(e) = validate::validate_file(dest.file(), opts) {
        if keeps_rejected_file(opts, &e) {
            tracing::debug!(path = %dest.file().display(), error = %e, "keeping rejected download");
        } else {
            dest.remove();
        }
        return Err(e);
    }

    tracing::info!(
        url = %url,
        path = %dest.file().display(),
        bytes = written,
        "download complete"
    );
    Ok(dest.into_file())
}

/// Only a MIME rejection can leave the file behind, and only when asked to.
fn keeps_rejected_file(opts: &Options, err: &DownloadError) -> bool {
    opts.keep_rejected && err.is_validation()
}
