//! Device-group aggregation: sums already-derived per-device rates into
//! a user-labeled total. There is no persistent kernel counter behind a
//! group, so this operates on [`super::disk::DiskDerived`] values, not
//! on raw counters — a group is defined purely by which device names
//! its label covers, supplied by the caller at setup time.

use super::disk::DiskDerived;

/// Sums the rate fields of every member device and re-derives the
/// ratio/percentage fields from the summed bases rather than averaging
/// them, matching how a single device's own fields are computed.
pub fn aggregate<'a>(members: impl IntoIterator<Item = &'a DiskDerived>) -> DiskDerived {
    let mut total = DiskDerived::default();
    let mut count: u32 = 0;
    for d in members {
        total.read_kb_per_s += d.read_kb_per_s;
        total.write_kb_per_s += d.write_kb_per_s;
        total.reads_per_s += d.reads_per_s;
        total.writes_per_s += d.writes_per_s;
        total.read_merges_per_s += d.read_merges_per_s;
        total.write_merges_per_s += d.write_merges_per_s;
        total.avg_queue_size += d.avg_queue_size;
        total.util_percent += d.util_percent;
        count += 1;
    }
    if count > 0 {
        // A group's util% is the member average, clamped, not a sum: a
        // four-disk group cannot be "280% busy".
        total.util_percent = (total.util_percent / count as f64).min(100.0);
        let total_ios = total.reads_per_s + total.writes_per_s;
        if total_ios > 0.0 {
            // 1 sector = 0.5 KB, so sectors/s = 2 * KB/s; dividing by
            // total IOs/s gives the group's average request size.
            total.avg_request_size_sectors = (total.read_kb_per_s + total.write_kb_per_s) * 2.0 / total_ios;
        }
    }
    total
}
