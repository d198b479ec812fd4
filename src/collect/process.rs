//! Per-task collector: enumerates `/proc/<pid>` (and, for thread
//! granularity, `/proc/<pid>/task/<tid>`) and assembles a
//! [`crate::model::TaskRaw`] from `stat`, `status`, `io` and
//! `schedstat`.

use crate::error::CollectError;
use crate::fs::FileSystem;
use crate::model::TaskRaw;
use crate::parse;
use std::path::{Path, PathBuf};

/// Lists every numeric entry directly under `proc_root` — the set of
/// live top-level processes.
pub fn list_pids(fs: &dyn FileSystem, proc_root: &Path) -> Result<Vec<u32>, CollectError> {
    list_numeric_entries(fs, proc_root)
}

/// Lists every thread id under `<proc_root>/<pid>/task`. A process that
/// disappeared between enumeration and this call yields an empty list
/// rather than an error — the caller's subsequent per-task read will
/// surface `CollectError::Gone` for the main thread if it matters.
pub fn list_tids(fs: &dyn FileSystem, proc_root: &Path, pid: u32) -> Vec<u32> {
    list_numeric_entries(fs, &proc_root.join(pid.to_string()).join("task")).unwrap_or_default()
}

fn list_numeric_entries(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<u32>, CollectError> {
    if !fs.exists(dir) {
        return Ok(Vec::new());
    }
    let entries = fs.read_dir(dir)?;
    let mut ids: Vec<u32> = entries
        .iter()
        .filter_map(|p| p.file_name()?.to_str()?.parse::<u32>().ok())
        .collect();
    ids.sort_unstable();
    Ok(ids)
}

/// Reads every counter source for one task (process or thread) rooted at
/// `<proc_root>/<pid>` (or `<proc_root>/<tgid>/task/<tid>` for a
/// non-leading thread) and assembles a [`TaskRaw`].
///
/// Returns `CollectError::Gone` specifically when `stat` could not be
/// read because the task directory vanished mid-collection, so callers
/// can distinguish "subject disappeared" (expected, non-fatal) from a
/// genuine I/O or parse failure.
pub fn read_task(fs: &dyn FileSystem, task_dir: &Path) -> Result<(String, TaskRaw), CollectError> {
    let stat_content = match fs.read_to_string(&task_dir.join("stat")) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(CollectError::Gone),
        Err(e) => return Err(e.into()),
    };
    let stat = parse::process::parse_task_stat(&stat_content)?;

    let (nvcsw, nivcsw) = fs
        .read_to_string(&task_dir.join("status"))
        .map(|c| parse::process::parse_task_status_ctxt_switches(&c))
        .unwrap_or((0, 0));

    let (io, io_unreadable) = match fs.read_to_string(&task_dir.join("io")) {
        Ok(c) => (parse::process::parse_task_io(&c), false),
        Err(_) => (Default::default(), true),
    };

    let sched_wait_ns = fs
        .read_to_string(&task_dir.join("schedstat"))
        .ok()
        .and_then(|c| parse::process::parse_task_schedstat(&c).ok())
        .unwrap_or(0);

    let fd_count = fs.read_dir(&task_dir.join("fd")).map(|v| v.len() as u32).unwrap_or(0);

    let raw = TaskRaw {
        utime: stat.utime,
        stime: stat.stime,
        cutime: stat.cutime,
        cstime: stat.cstime,
        gtime: stat.gtime,
        cgtime: stat.cgtime,
        minflt: stat.minflt,
        cminflt: stat.cminflt,
        majflt: stat.majflt,
        cmajflt: stat.cmajflt,
        vsz: stat.vsize,
        rss: stat.rss,
        processor: stat.processor,
        priority: stat.priority,
        policy: stat.policy,
        nvcsw,
        nivcsw,
        sched_wait_ns,
        read_bytes: io.read_bytes,
        write_bytes: io.write_bytes,
        cancelled_write_bytes: io.cancelled_write_bytes,
        fd_count,
        num_threads: stat.num_threads,
        io_unreadable,
    };
    Ok((stat.comm, raw))
}

pub fn process_dir(proc_root: &Path, pid: u32) -> PathBuf {
    proc_root.join(pid.to_string())
}

pub fn thread_dir(proc_root: &Path, tgid: u32, tid: u32) -> PathBuf {
    proc_root.join(tgid.to_string()).join("task").join(tid.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFs;

    fn sample_stat(pid: u32) -> String {
        format!(
            "{pid} (worker) S 1 {pid} {pid} 0 -1 4194304 10 0 0 0 500 100 0 0 20 0 4 0 \
             99999 10240000 512 0 0 0 0 0 0 0 0 0 0 0 0 17 1 0 0 0 0 0 0 0 0 0 0 0 0 0\n"
        )
    }

    #[test]
    fn lists_numeric_pids_only() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/1/stat", sample_stat(1));
        fs.add_file("/proc/42/stat", sample_stat(42));
        fs.add_file("/proc/self/stat", "ignored");
        let pids = list_pids(&fs, Path::new("/proc")).unwrap();
        assert_eq!(pids, vec![1, 42]);
    }

    #[test]
    fn reads_task_fields() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/42/stat", sample_stat(42));
        fs.add_file("/proc/42/status", "voluntary_ctxt_switches:\t3\nnonvoluntary_ctxt_switches:\t1\n");
        fs.add_file("/proc/42/io", "read_bytes: 100\nwrite_bytes: 200\ncancelled_write_bytes: 0\n");
        let (comm, raw) = read_task(&fs, &process_dir(Path::new("/proc"), 42)).unwrap();
        assert_eq!(comm, "worker");
        assert_eq!(raw.utime, 500);
        assert_eq!(raw.nvcsw, 3);
        assert_eq!(raw.read_bytes, 100);
        assert!(!raw.io_unreadable);
    }

    #[test]
    fn missing_stat_file_is_gone_not_error() {
        let fs = MockFs::new();
        let result = read_task(&fs, &process_dir(Path::new("/proc"), 999));
        assert!(matches!(result, Err(CollectError::Gone)));
    }

    #[test]
    fn unreadable_io_file_marks_flag_without_failing() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/42/stat", sample_stat(42));
        let (_, raw) = read_task(&fs, &process_dir(Path::new("/proc"), 42)).unwrap();
        assert!(raw.io_unreadable);
        assert_eq!(raw.read_bytes, 0);
    }
}
