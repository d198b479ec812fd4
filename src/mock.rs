//! In-memory filesystem fixture used by every reader's and collector's
//! unit tests, and by the scheduler tests that need deterministic ticks.

use crate::fs::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory stand-in for `/proc`/`/sys`.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a file's contents, creating parent directories.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.insert(path, content.into());
    }

    /// Removes a file, simulating a device/interface/process disappearing.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) {
        self.files.remove(path.as_ref());
    }

    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.directories.insert(path);
    }

    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if p.as_os_str().is_empty() {
                break;
            }
            self.directories.insert(p.to_path_buf());
            parent = p.parent();
        }
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{path:?}")))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.directories.contains(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, format!("{path:?}")));
        }
        let mut entries: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .chain(
                self.directories
                    .iter()
                    .filter(|p| p.parent() == Some(path) && p.as_path() != path)
                    .cloned(),
            )
            .collect();
        entries.sort();
        entries.dedup();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_file_creates_parents() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/stat", "cpu 1 2 3 4\n");
        assert!(fs.exists(Path::new("/proc")));
        assert_eq!(fs.read_to_string(Path::new("/proc/stat")).unwrap(), "cpu 1 2 3 4\n");
    }

    #[test]
    fn read_dir_lists_children_once() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/1/stat", "a");
        fs.add_file("/proc/2/stat", "b");
        let entries = fs.read_dir(Path::new("/proc")).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn remove_file_then_missing() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/diskstats", "x");
        fs.remove_file("/proc/diskstats");
        assert!(fs.read_to_string(Path::new("/proc/diskstats")).is_err());
    }
}
