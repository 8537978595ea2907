//! Disk side of a download: the per-call destination directory and the
//! size-bounded file writer.

mod destination;
mod writer;

pub use destination::Destination;
pub use writer::{BoundedWriter, WriteOutcome};
