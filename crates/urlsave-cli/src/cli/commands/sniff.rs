//! `urlsave sniff <path>` – print the sniffed MIME type.

use anyhow::{Context, Result};
use std::path::Path;
use urlsave_core::sniff;

pub fn run_sniff(path: &Path) -> Result<()> {
    let mime = sniff::sniff_file(path).with_context(|| format!("sniff {}", path.display()))?;
    println!("{}", mime);
    Ok(())
}
