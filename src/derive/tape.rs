//! Tape drive throughput derivation.
//!
//! Unlike every other source, tape throughput is derived from wall-clock
//! timestamps rather than `/proc/uptime`, because `stats/*` counters are
//! read from `/sys` at whatever instant the collector gets to them, with
//! no interval clock of their own.

use crate::derive::counter_delta;
use crate::model::TapeRaw;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TapeDerived {
    pub read_kb_per_s: f64,
    pub write_kb_per_s: f64,
    pub reads_per_s: f64,
    pub writes_per_s: f64,
    pub avg_read_service_ms: f64,
    pub avg_write_service_ms: f64,
}

/// Derives tape throughput. Either row being `invalid` (a stats file
/// failed to read) yields `None` rather than a misleading zeroed row.
pub fn derive(prev: &TapeRaw, curr: &TapeRaw) -> Option<TapeDerived> {
    if prev.invalid || curr.invalid {
        return None;
    }
    let elapsed_s = (curr.timestamp_ms - prev.timestamp_ms).max(0) as f64 / 1000.0;
    if elapsed_s <= 0.0 {
        return Some(TapeDerived::default());
    }

    let read_bytes = counter_delta(prev.read_bytes, curr.read_bytes);
    let write_bytes = counter_delta(prev.write_bytes, curr.write_bytes);
    let read_cnt = counter_delta(prev.read_cnt, curr.read_cnt);
    let write_cnt = counter_delta(prev.write_cnt, curr.write_cnt);
    let read_ns = counter_delta(prev.read_ns, curr.read_ns);
    let write_ns = counter_delta(prev.write_ns, curr.write_ns);

    Some(TapeDerived {
        read_kb_per_s: (read_bytes as f64 / 1024.0) / elapsed_s,
        write_kb_per_s: (write_bytes as f64 / 1024.0) / elapsed_s,
        reads_per_s: read_cnt as f64 / elapsed_s,
        writes_per_s: write_cnt as f64 / elapsed_s,
        avg_read_service_ms: if read_cnt > 0 { (read_ns as f64 / 1_000_000.0) / read_cnt as f64 } else { 0.0 },
        avg_write_service_ms: if write_cnt > 0 { (write_ns as f64 / 1_000_000.0) / write_cnt as f64 } else { 0.0 },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tape(read_bytes: u64, write_bytes: u64, read_cnt: u64, write_cnt: u64, timestamp_ms: i64) -> TapeRaw {
        TapeRaw { read_bytes, write_bytes, read_cnt, write_cnt, timestamp_ms, ..Default::default() }
    }

    #[test]
    fn derives_throughput_from_wall_clock_gap() {
        let prev = tape(0, 0, 0, 0, 0);
        let curr = tape(1024 * 10, 0, 5, 0, 1000);
        let d = derive(&prev, &curr).unwrap();
        assert_eq!(d.read_kb_per_s, 10.0);
        assert_eq!(d.reads_per_s, 5.0);
    }

    #[test]
    fn invalid_row_yields_none() {
        let prev = tape(0, 0, 0, 0, 0);
        let mut curr = tape(100, 0, 1, 0, 1000);
        curr.invalid = true;
        assert!(derive(&prev, &curr).is_none());
    }

    #[test]
    fn zero_elapsed_time_yields_default() {
        let prev = tape(0, 0, 0, 0, 1000);
        let curr = tape(100, 0, 1, 0, 1000);
        assert_eq!(derive(&prev, &curr).unwrap(), TapeDerived::default());
    }
}
