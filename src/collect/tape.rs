//! Tape drive collector: enumerates `/sys/class/scsi_tape/st<N>` and
//! reads each drive's `stats/*` counter files.

use crate::error::CollectError;
use crate::fs::FileSystem;
use crate::model::TapeRaw;
use crate::parse::tape::parse_counter_file;
use std::path::Path;

const COUNTER_FILES: &[(&str, fn(&mut TapeRaw, u64))] = &[
    ("read_ns", |r, v| r.read_ns = v),
    ("write_ns", |r, v| r.write_ns = v),
    ("io_ns", |r, v| r.io_ns = v),
    ("read_byte_cnt", |r, v| r.read_bytes = v),
    ("write_byte_cnt", |r, v| r.write_bytes = v),
    ("read_cnt", |r, v| r.read_cnt = v),
    ("write_cnt", |r, v| r.write_cnt = v),
    ("other_cnt", |r, v| r.other_cnt = v),
    ("resid_cnt", |r, v| r.resid_cnt = v),
];

/// Lists tape drive names (`st0`, `st1`, ...) under `sys_root/class/scsi_tape`.
pub fn list_tape_drives(fs: &dyn FileSystem, sys_root: &Path) -> Vec<String> {
    let dir = sys_root.join("class/scsi_tape");
    if !fs.exists(&dir) {
        return Vec::new();
    }
    let Ok(entries) = fs.read_dir(&dir) else { return Vec::new() };
    let mut names: Vec<String> = entries
        .iter()
        .filter_map(|p| p.file_name()?.to_str().map(String::from))
        // Only the rewind, mode-0, no-setting nodes ("stN"); "nstN" and
        // "stNa".."stNl" are alternate device-mode nodes for the same
        // drive and would double-count it.
        .filter(|name| {
            name.starts_with('s')
                && name[1..].starts_with('t')
                && name[2..].chars().next().is_some_and(|c| c.is_ascii_digit())
                && name.chars().last().is_some_and(|c| c.is_ascii_digit())
        })
        .collect();
    names.sort();
    names
}

/// Reads one tape drive's counters, with `timestamp_ms` stamped by the
/// caller (tape throughput is wall-clock-derived).
pub fn read_tape(
    fs: &dyn FileSystem,
    sys_root: &Path,
    drive: &str,
    timestamp_ms: i64,
) -> Result<TapeRaw, CollectError> {
    let stats_dir = sys_root.join("class/scsi_tape").join(drive).join("stats");
    let mut raw = TapeRaw { timestamp_ms, ..Default::default() };
    for (file_name, setter) in COUNTER_FILES {
        match fs.read_to_string(&stats_dir.join(file_name)) {
            Ok(content) => match parse_counter_file(&content) {
                Ok(value) => setter(&mut raw, value),
                Err(_) => raw.invalid = true,
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(CollectError::Gone),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(raw)
}
