//! CIFS mount rate derivation.

use crate::derive::{counter_delta, rate_per_second};
use crate::model::CifsRaw;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CifsDerived {
    pub reads_per_s: f64,
    pub writes_per_s: f64,
    pub read_bytes_per_s: f64,
    pub write_bytes_per_s: f64,
    pub opens_per_s: f64,
    pub closes_per_s: f64,
    pub deletes_per_s: f64,
}

pub fn derive(prev: &CifsRaw, curr: &CifsRaw, interval_cs: u64) -> CifsDerived {
    CifsDerived {
        reads_per_s: rate_per_second(counter_delta(prev.read_ops, curr.read_ops), interval_cs),
        writes_per_s: rate_per_second(counter_delta(prev.write_ops, curr.write_ops), interval_cs),
        read_bytes_per_s: rate_per_second(counter_delta(prev.read_bytes, curr.read_bytes), interval_cs),
        write_bytes_per_s: rate_per_second(counter_delta(prev.write_bytes, curr.write_bytes), interval_cs),
        opens_per_s: rate_per_second(counter_delta(prev.file_opens, curr.file_opens), interval_cs),
        closes_per_s: rate_per_second(counter_delta(prev.file_closes, curr.file_closes), interval_cs),
        deletes_per_s: rate_per_second(counter_delta(prev.file_deletes, curr.file_deletes), interval_cs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_operation_rates() {
        let prev = CifsRaw { read_ops: 10, write_ops: 5, ..Default::default() };
        let curr = CifsRaw { read_ops: 110, write_ops: 55, ..Default::default() };
        let d = derive(&prev, &curr, 100);
        assert_eq!(d.reads_per_s, 100.0);
        assert_eq!(d.writes_per_s, 50.0);
    }
}
