//! Unique per-download directory under the base folder.

use crate::error::DownloadError;
use std::fs::DirBuilder;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Directory permissions: rwxr-xr-x.
const DIR_MODE: u32 = 0o755;

/// An allocated `<base>/<id>/<filename>` location.
#[derive(Debug, Clone)]
pub struct Destination {
    id: String,
    dir: PathBuf,
    file: PathBuf,
}

impl Destination {
    /// Generates a fresh v4 UUID and creates `<base>/<id>` (with parents).
    /// The file itself is not created here.
    pub fn allocate(base: &Path, filename: &str) -> Result<Self, DownloadError> {
        let id = Uuid::new_v4().to_string();
        let dir = base.join(&id);
        create_dir_all(&dir).map_err(|source| DownloadError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        let file = dir.join(filename);
        tracing::debug!(id = %id, dir = %dir.display(), "allocated download directory");
        Ok(Destination { id, dir, file })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the downloaded file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Recursively removes the directory. Failures are logged, not returned.
    pub fn remove(&self) {
        if let Err(e) = std::fs::remove_dir_all(&self.dir) {
            tracing::warn!(
                dir = %self.dir.display(),
                error = %e,
                "failed to remove download directory"
            );
        }
    }

    /// Gives up the directory and returns the file path.
    pub fn into_file(self) -> PathBuf {
        self.file
    }
}

#[cfg(unix)]
fn create_dir_all(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    DirBuilder::new().recursive(true).mode(DIR_MODE).create(dir)
}

#[cfg(not(unix))]
fn create_dir_all(dir: &Path) -> io::Result<()> {
    let _ = DIR_MODE;
    DirBuilder::new().recursive(true).create(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_creates_nested_dir() {
        let base = tempfile::tempdir().unwrap();
        let nested = base.path().join("a").join("b");
        let d = Destination::allocate(&nested, "report.pdf").unwrap();
        assert!(d.dir().is_dir());
        assert_eq!(d.dir(), nested.join(d.id()));
        assert_eq!(d.file(), d.dir().join("report.pdf"));
        assert!(!d.file().exists());
        assert_eq!(d.id().len(), 36);
    }

    #[test]
    fn ids_are_distinct() {
        let base = tempfile::tempdir().unwrap();
        let a = Destination::allocate(base.path(), "x").unwrap();
        let b = Destination::allocate(base.path(), "x").unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(a.file(), b.file());
    }

    #[cfg(unix)]
    #[test]
    fn dir_mode_is_755() {
        use std::os::unix::fs::PermissionsExt;
        let base = tempfile::tempdir().unwrap();
        let d = Destination::allocate(base.path(), "x").unwrap();
        let mode = std::fs::metadata(d.dir()).unwrap().permissions().mode() & 0o777;
        // umask can only clear bits
        assert_eq!(mode & !0o755, 0);
        assert_ne!(mode & 0o700, 0);
    }

    #[test]
    fn remove_deletes_contents() {
        let base = tempfile::tempdir().unwrap();
        let d = Destination::allocate(base.path(), "f.bin").unwrap();
        std::fs::write(d.file(), b"partial").unwrap();
        d.remove();
        assert!(!d.dir().exists());
        // second removal only logs
        d.remove();
    }

    #[test]
    fn allocate_fails_when_base_is_a_file() {
        let base = tempfile::tempdir().unwrap();
        let blocker = base.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let err = Destination::allocate(&blocker, "f").unwrap_err();
        assert!(matches!(err, DownloadError::CreateDir { .. }));
    }
}
