//! Block device extended statistics: throughput, await, queue depth,
//! merge ratios, utilization, and removed-and-reinserted detection.
//!
//! `/proc/diskstats`' `*_ticks` fields are milliseconds despite the
//! name; `interval_cs` (centiseconds) is converted to milliseconds
//! locally rather than pushing unit conversion onto every caller.

use crate::derive::counter_delta;
use crate::model::DiskRaw;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiskDerived {
    pub read_kb_per_s: f64,
    pub write_kb_per_s: f64,
    pub reads_per_s: f64,
    pub writes_per_s: f64,
    pub read_merges_per_s: f64,
    pub write_merges_per_s: f64,
    pub avg_request_size_sectors: f64,
    pub avg_queue_size: f64,
    pub await_ms: f64,
    pub read_await_ms: f64,
    pub write_await_ms: f64,
    pub util_percent: f64,
}

/// A device is "removed and reinserted" under the same name when its
/// total I/O count and every sectors field both read lower than the
/// previous sample: every op count (`rd_ios + wr_ios + dc_ios + fl_ios`)
/// dropped, and `rd_sectors`/`wr_sectors`/`dc_sectors` each dropped too.
/// A device that legitimately did fewer operations this tick would not
/// also show fewer sectors moved, so the conjunction is what
/// distinguishes a reset from ordinary quiet periods.
pub fn is_reinserted(prev: &DiskRaw, curr: &DiskRaw) -> bool {
    let curr_ops = curr.rd_ios + curr.wr_ios + curr.dc_ios + curr.fl_ios;
    let prev_ops = prev.rd_ios + prev.wr_ios + prev.dc_ios + prev.fl_ios;
    curr_ops < prev_ops
        && curr.rd_sectors < prev.rd_sectors
        && curr.wr_sectors < prev.wr_sectors
        && curr.dc_sectors < prev.dc_sectors
}

/// Derives extended disk statistics for one device over `interval_cs`
/// centiseconds. When [`is_reinserted`] detects a removed-and-reinserted
/// device, `prev` is treated as all-zero for this tick rather than
/// differenced against the old device's counters.
pub fn derive(prev: &DiskRaw, curr: &DiskRaw, interval_cs: u64) -> DiskDerived {
    if interval_cs == 0 {
        return DiskDerived::default();
    }
    let reset = DiskRaw::default();
    let prev = if is_reinserted(prev, curr) { &reset } else { prev };
    let interval_s = interval_cs as f64 / 100.0;
    let interval_ms = interval_cs as f64 * 10.0;

    let rd_ios = counter_delta(prev.rd_ios, curr.rd_ios);
    let wr_ios = counter_delta(prev.wr_ios, curr.wr_ios);
    let rd_merges = counter_delta(prev.rd_merges, curr.rd_merges);
    let wr_merges = counter_delta(prev.wr_merges, curr.wr_merges);
    let rd_sectors = counter_delta(prev.rd_sectors, curr.rd_sectors);
    let wr_sectors = counter_delta(prev.wr_sectors, curr.wr_sectors);
    let rd_ticks = counter_delta(prev.rd_ticks, curr.rd_ticks);
    let wr_ticks = counter_delta(prev.wr_ticks, curr.wr_ticks);
    let tot_ticks = counter_delta(prev.tot_ticks, curr.tot_ticks);
    let rq_ticks = counter_delta(prev.rq_ticks, curr.rq_ticks);

    let total_ios = rd_ios + wr_ios;
    let total_sectors = rd_sectors + wr_sectors;
    let total_ticks_rw = rd_ticks + wr_ticks;

    DiskDerived {
        read_kb_per_s: (rd_sectors as f64 / 2.0) / interval_s,
        write_kb_per_s: (wr_sectors as f64 / 2.0) / interval_s,
        reads_per_s: rd_ios as f64 / interval_s,
        writes_per_s: wr_ios as f64 / interval_s,
        read_merges_per_s: rd_merges as f64 / interval_s,
        write_merges_per_s: wr_merges as f64 / interval_s,
        avg_request_size_sectors: if total_ios > 0 {
            total_sectors as f64 / total_ios as f64
        } else {
            0.0
        },
        avg_queue_size: rq_ticks as f64 / interval_ms,
        await_ms: if total_ios > 0 { total_ticks_rw as f64 / total_ios as f64 } else { 0.0 },
        read_await_ms: if rd_ios > 0 { rd_ticks as f64 / rd_ios as f64 } else { 0.0 },
        write_await_ms: if wr_ios > 0 { wr_ticks as f64 / wr_ios as f64 } else { 0.0 },
        util_percent: (tot_ticks as f64 * 100.0 / interval_ms).min(100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(rd_ios: u64, rd_sectors: u64, rd_ticks: u64, wr_ios: u64, wr_sectors: u64, wr_ticks: u64, tot_ticks: u64) -> DiskRaw {
        DiskRaw { rd_ios, rd_sectors, rd_ticks, wr_ios, wr_sectors, wr_ticks, tot_ticks, ..Default::default() }
    }

    #[test]
    fn derives_throughput_and_await() {
        let prev = disk(100, 2000, 500, 50, 1000, 300, 700);
        let curr = disk(200, 4000, 1000, 100, 2000, 600, 1400);
        // 1-second interval (100 centiseconds).
        let d = derive(&prev, &curr, 100);
        assert_eq!(d.reads_per_s, 100.0);
        assert_eq!(d.read_kb_per_s, 1000.0);
        assert_eq!(d.await_ms, (500.0 + 300.0) / 150.0);
    }

    #[test]
    fn util_percent_is_clamped_to_100() {
        let prev = disk(0, 0, 0, 0, 0, 0, 0);
        let curr = disk(0, 0, 0, 0, 0, 0, 5000);
        // Interval of 1000ms (100 cs) but 5000ms of busy time recorded —
        // only possible with a multi-queue device, still must clamp.
        let d = derive(&prev, &curr, 100);
        assert_eq!(d.util_percent, 100.0);
    }

    #[test]
    fn zero_interval_yields_default() {
        let prev = disk(0, 0, 0, 0, 0, 0, 0);
        let curr = disk(1, 1, 1, 1, 1, 1, 1);
        assert_eq!(derive(&prev, &curr, 0), DiskDerived::default());
    }

    #[test]
    fn detects_reinserted_device() {
        let prev = DiskRaw { rd_ios: 1000, rd_sectors: 20000, wr_ios: 500, wr_sectors: 10000, ..Default::default() };
        let curr = DiskRaw { rd_ios: 10, rd_sectors: 200, wr_ios: 5, wr_sectors: 100, ..Default::default() };
        assert!(is_reinserted(&prev, &curr));
    }

    #[test]
    fn same_counters_are_not_reinserted() {
        let prev = DiskRaw { rd_ios: 1000, rd_sectors: 20000, ..Default::default() };
        let curr = DiskRaw { rd_ios: 1000, rd_sectors: 20000, ..Default::default() };
        assert!(!is_reinserted(&prev, &curr));
    }

    #[test]
    fn ops_drop_without_sectors_dropping_is_not_reinserted() {
        // rd_ios regressed but rd_sectors didn't: a merge-ratio change,
        // not a reset.
        let prev = DiskRaw { rd_ios: 100, rd_sectors: 200, ..Default::default() };
        let curr = DiskRaw { rd_ios: 50, rd_sectors: 300, ..Default::default() };
        assert!(!is_reinserted(&prev, &curr));
    }

    #[test]
    fn reinserted_device_derives_as_if_prev_were_zero() {
        let prev = DiskRaw {
            rd_ios: 1000,
            rd_sectors: 20000,
            rd_ticks: 5000,
            wr_ios: 500,
            wr_sectors: 10000,
            wr_ticks: 2500,
            tot_ticks: 7000,
            ..Default::default()
        };
        let curr = DiskRaw { rd_ios: 10, rd_sectors: 200, rd_ticks: 50, wr_ios: 5, wr_sectors: 100, wr_ticks: 25, tot_ticks: 70, ..Default::default() };
        let d = derive(&prev, &curr, 100);
        assert_eq!(d.reads_per_s, 10.0);
        assert_eq!(d.writes_per_s, 5.0);
        assert_eq!(d.read_kb_per_s, 100.0);
        assert_eq!(d.util_percent, 7.0);
    }
}
