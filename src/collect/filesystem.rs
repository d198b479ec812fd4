//! Filesystem gauge collector: combines `/etc/mtab` with `statvfs(2)`
//! results. Unlike the other sources, filesystem usage is a gauge, not a
//! monotonic counter — there is nothing to difference, only to sample.

use crate::error::CollectError;
use crate::fs::FileSystem;
use crate::model::FsRaw;
use crate::parse::mount::{parse_mtab, MountEntry};
use crate::statvfs::VfsStat;
use std::path::Path;

/// Reads every mtab entry matching `include`, sampling its live usage
/// via `vfs`. A mount point that disappeared between reading `mtab` and
/// calling `statvfs` is skipped rather than failing the whole pass.
pub fn read_filesystems(
    fs: &dyn FileSystem,
    etc_root: &Path,
    vfs: &dyn VfsStat,
    include: impl Fn(&MountEntry) -> bool,
) -> Result<Vec<(MountEntry, FsRaw)>, CollectError> {
    let mtab_path = etc_root.join("mtab");
    if !fs.exists(&mtab_path) {
        return Ok(Vec::new());
    }
    let entries = parse_mtab(&fs.read_to_string(&mtab_path)?)?;
    let mut rows = Vec::new();
    for entry in entries.into_iter().filter(&include) {
        if let Ok(raw) = vfs.statvfs(Path::new(&entry.mount_point)) {
            rows.push((entry, raw));
        }
    }
    Ok(rows)
}

/// Default selection predicate: skips the common pseudo/virtual
/// filesystems that have no meaningful space usage.
pub fn is_real_filesystem(entry: &MountEntry) -> bool {
    !matches!(
        entry.fs_type.as_str(),
        "proc" | "sysfs" | "devtmpfs" | "tmpfs" | "cgroup" | "cgroup2" | "devpts" | "securityfs"
            | "pstore" | "debugfs" | "tracefs" | "mqueue" | "hugetlbfs" | "bpf" | "autofs"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFs;
    use crate::statvfs::MockVfsStat;

    #[test]
    fn skips_pseudo_filesystems_by_default() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/etc/mtab",
            "/dev/sda1 / ext4 rw 0 1\nproc /proc proc rw 0 0\n",
        );
        let mut vfs = MockVfsStat::new();
        vfs.set("/", FsRaw { f_blocks: 100, ..Default::default() });
        vfs.set("/proc", FsRaw::default());

        let rows = read_filesystems(&fs, Path::new("/etc"), &vfs, is_real_filesystem).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0.mount_point, "/");
    }

    #[test]
    fn missing_mtab_yields_empty_list() {
        let fs = MockFs::new();
        let vfs = MockVfsStat::new();
        assert!(read_filesystems(&fs, Path::new("/etc"), &vfs, is_real_filesystem).unwrap().is_empty());
    }

    #[test]
    fn skips_mount_point_that_disappeared() {
        let mut fs = MockFs::new();
        fs.add_file("/etc/mtab", "/dev/sda1 /gone ext4 rw 0 1\n");
        let vfs = MockVfsStat::new();
        assert!(read_filesystems(&fs, Path::new("/etc"), &vfs, is_real_filesystem).unwrap().is_empty());
    }
}
