//! Filesystem abstraction so readers can run against either the real
//! `/proc`/`/sys` trees or an in-memory fixture.

use std::io;
use std::path::{Path, PathBuf};

/// Abstraction over the handful of filesystem operations the source
/// readers need. Lets every reader run unmodified against `RealFs` in
/// production and `MockFs` in tests.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Returns `true` if `path` exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Lists the direct children of a directory.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Filesystem implementation that delegates to `std::fs`, for use against
/// the real `/proc` and `/sys` trees.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(path)? {
            paths.push(entry?.path());
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn real_fs_reads_and_lists() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("stat");
        std::fs::File::create(&file_path)
            .unwrap()
            .write_all(b"cpu 1 2 3 4\n")
            .unwrap();

        let fs = RealFs::new();
        assert!(fs.exists(&file_path));
        assert_eq!(fs.read_to_string(&file_path).unwrap(), "cpu 1 2 3 4\n");

        let entries = fs.read_dir(dir.path()).unwrap();
        assert_eq!(entries, vec![file_path]);
    }

    #[test]
    fn real_fs_missing_path() {
        let fs = RealFs::new();
        assert!(!fs.exists(Path::new("/nonexistent/sarcore/path")));
        assert!(fs.read_to_string(Path::new("/nonexistent/sarcore/path")).is_err());
    }
}
