//! `statvfs(2)` wrapper for filesystem gauge metrics. Kept separate from
//! [`crate::fs::FileSystem`] because it reports live kernel-computed
//! aggregates rather than file content, and has no natural in-memory
//! fixture beyond a literal struct.

use crate::model::FsRaw;
use std::ffi::CString;
use std::io;
use std::mem::MaybeUninit;
use std::path::Path;

/// Abstraction over `statvfs(2)` so the filesystem collector can run
/// against a fixed set of values in tests without touching the real
/// mount table.
pub trait VfsStat: Send + Sync {
    fn statvfs(&self, mount_point: &Path) -> io::Result<FsRaw>;
}

/// Calls the real `statvfs(2)` syscall via `libc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealVfsStat;

impl VfsStat for RealVfsStat {
    fn statvfs(&self, mount_point: &Path) -> io::Result<FsRaw> {
        let c_path = CString::new(mount_point.as_os_str().as_encoded_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let mut buf = MaybeUninit::<libc::statvfs>::uninit();
        // SAFETY: `c_path` is NUL-terminated and lives for the call;
        // `buf` is only read after the kernel has written a full
        // `statvfs` into it (a non-negative return guarantees that).
        let rc = unsafe { libc::statvfs(c_path.as_ptr(), buf.as_mut_ptr()) };
        if rc != 0 {
            return Err(io::Error::last_os_error());
        }
        let stat = unsafe { buf.assume_init() };
        Ok(FsRaw {
            f_blocks: stat.f_blocks as u64,
            f_bfree: stat.f_bfree as u64,
            f_bavail: stat.f_bavail as u64,
            f_files: stat.f_files as u64,
            f_ffree: stat.f_ffree as u64,
            frsize: stat.f_frsize as u64,
        })
    }
}

/// Fixed-answer stand-in for tests; avoids depending on mounted
/// filesystems existing in the test environment.
#[derive(Debug, Default, Clone)]
pub struct MockVfsStat {
    answers: std::collections::HashMap<std::path::PathBuf, FsRaw>,
}

impl MockVfsStat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, mount_point: impl Into<std::path::PathBuf>, raw: FsRaw) {
        self.answers.insert(mount_point.into(), raw);
    }
}

impl VfsStat for MockVfsStat {
    fn statvfs(&self, mount_point: &Path) -> io::Result<FsRaw> {
        self.answers
            .get(mount_point)
            .copied()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no mock statvfs answer"))
    }
}
