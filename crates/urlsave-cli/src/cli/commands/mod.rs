//! CLI command handlers, one per file.

mod get;
mod sniff;

pub use get::run_get;
#[cfg(test)]
pub(crate) use get::flag_mutators;
pub use sniff::run_sniff;
