//! Network interface rate derivation.

use crate::derive::{counter_delta, rate_per_second};
use crate::model::NetRaw;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetDerived {
    pub rx_bytes_per_s: f64,
    pub rx_packets_per_s: f64,
    pub rx_errs_per_s: f64,
    pub rx_drop_per_s: f64,
    pub rx_compressed_per_s: f64,
    pub rx_multicast_per_s: f64,
    pub tx_bytes_per_s: f64,
    pub tx_packets_per_s: f64,
    pub tx_errs_per_s: f64,
    pub tx_drop_per_s: f64,
    pub tx_compressed_per_s: f64,
}

pub fn derive(prev: &NetRaw, curr: &NetRaw, interval_cs: u64) -> NetDerived {
    NetDerived {
        rx_bytes_per_s: rate_per_second(counter_delta(prev.rx_bytes, curr.rx_bytes), interval_cs),
        rx_packets_per_s: rate_per_second(counter_delta(prev.rx_packets, curr.rx_packets), interval_cs),
        rx_errs_per_s: rate_per_second(counter_delta(prev.rx_errs, curr.rx_errs), interval_cs),
        rx_drop_per_s: rate_per_second(counter_delta(prev.rx_drop, curr.rx_drop), interval_cs),
        rx_compressed_per_s: rate_per_second(counter_delta(prev.rx_compressed, curr.rx_compressed), interval_cs),
        rx_multicast_per_s: rate_per_second(counter_delta(prev.rx_multicast, curr.rx_multicast), interval_cs),
        tx_bytes_per_s: rate_per_second(counter_delta(prev.tx_bytes, curr.tx_bytes), interval_cs),
        tx_packets_per_s: rate_per_second(counter_delta(prev.tx_packets, curr.tx_packets), interval_cs),
        tx_errs_per_s: rate_per_second(counter_delta(prev.tx_errs, curr.tx_errs), interval_cs),
        tx_drop_per_s: rate_per_second(counter_delta(prev.tx_drop, curr.tx_drop), interval_cs),
        tx_compressed_per_s: rate_per_second(counter_delta(prev.tx_compressed, curr.tx_compressed), interval_cs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_throughput_over_one_second() {
        let prev = NetRaw { rx_bytes: 1000, tx_bytes: 500, ..Default::default() };
        let curr = NetRaw { rx_bytes: 2000, tx_bytes: 1500, ..Default::default() };
        let d = derive(&prev, &curr, 100);
        assert_eq!(d.rx_bytes_per_s, 1000.0);
        assert_eq!(d.tx_bytes_per_s, 1000.0);
    }

    #[test]
    fn counter_reset_restarts_from_curr() {
        let prev = NetRaw { rx_packets: 500_000, ..Default::default() };
        let curr = NetRaw { rx_packets: 10, ..Default::default() };
        let d = derive(&prev, &curr, 100);
        assert_eq!(d.rx_packets_per_s, 10.0);
    }

    #[test]
    fn zero_interval_is_zero_rate() {
        let prev = NetRaw::default();
        let curr = NetRaw { rx_bytes: 100, ..Default::default() };
        assert_eq!(derive(&prev, &curr, 0).rx_bytes_per_s, 0.0);
    }
}
