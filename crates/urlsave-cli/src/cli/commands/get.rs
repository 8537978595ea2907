//! `urlsave get <url>` – bounded, validated download.

use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;
use urlsave_core::config::UrlsaveConfig;
use urlsave_core::{options, resolve_options, OptionFn};

use crate::cli::GetArgs;

/// Mutators for the flags that were given; applied after the config defaults.
pub(crate) fn flag_mutators(args: &GetArgs) -> Vec<OptionFn> {
    let mut ops = Vec::new();
    if let Some(n) = args.max_size {
        ops.push(options::max_size(n));
    }
    if let Some(dir) = &args.base_folder {
        ops.push(options::base_folder(dir.clone()));
    }
    if let Some(mime) = &args.mime_type {
        ops.push(options::mime_type(mime.clone()));
    }
    if !args.mime_groups.is_empty() {
        ops.push(options::mime_groups(args.mime_groups.clone()));
    }
    if args.keep_rejected {
        ops.push(options::keep_rejected(true));
    }
    if let Some(secs) = args.timeout {
        ops.push(options::timeout(Duration::from_secs(secs)));
    }
    ops
}

pub fn run_get(cfg: &UrlsaveConfig, args: &GetArgs) -> Result<()> {
    let url = Url::parse(&args.url).with_context(|| format!("invalid URL: {}", args.url))?;

    let base = cfg.to_options();
    let mut ops = vec![options::mutator(move |o| {
        *o = base;
        Ok(())
    })];
    ops.extend(flag_mutators(args));
    let opts = resolve_options(ops)?;

    let path = urlsave_core::download_with_options(&url, &opts)
        .with_context(|| format!("download {}", url))?;
    println!("{}", path.display());
    Ok(())
}
