//! NUMA node membership: which logical CPUs belong to which node.
//!
//! The kernel does not expose this as a single text file the way it does
//! `/proc/stat`; membership is the *presence* of
//! `/sys/devices/system/cpu/cpu<N>/node<M>` as a directory. This
//! collector walks that tree once per tick and returns it as plain
//! `(node, cpu)` pairs, leaving aggregation to [`crate::derive::cpu`].

use crate::fs::FileSystem;
use std::path::Path;

/// Scans `<sys_root>/devices/system/cpu/cpu<N>/node<M>` entries and
/// returns every `(node, cpu)` membership pair found. A CPU missing a
/// `node<M>` child (uniprocessor systems, or NUMA disabled) contributes
/// no pair and is left out of node-level aggregation.
pub fn read_node_membership(fs: &dyn FileSystem, sys_root: &Path) -> Vec<(u32, u32)> {
    let cpu_root = sys_root.join("devices/system/cpu");
    let mut pairs = Vec::new();
    let Ok(cpu_entries) = fs.read_dir(&cpu_root) else {
        return pairs;
    };
    for cpu_path in cpu_entries {
        let Some(cpu_num) = cpu_index(&cpu_path) else { continue };
        let Ok(children) = fs.read_dir(&cpu_path) else { continue };
        for child in children {
            if let Some(node_num) = node_index(&child) {
                pairs.push((node_num, cpu_num));
            }
        }
    }
    pairs.sort_unstable();
    pairs
}

fn cpu_index(path: &Path) -> Option<u32> {
    let name = path.file_name()?.to_str()?;
    name.strip_prefix("cpu")?.parse().ok()
}

fn node_index(path: &Path) -> Option<u32> {
    let name = path.file_name()?.to_str()?;
    name.strip_prefix("node")?.parse().ok()
}
