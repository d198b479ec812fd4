//! Interrupt rate derivation.
//!
//! Row-to-row alignment across samples is the registry's job (rows are
//! keyed by interrupt name, not position); this module only has to cope
//! with the per-CPU column count changing between samples (CPU hotplug),
//! by zero-padding the shorter side before differencing.

use crate::derive::{counter_delta, rate_per_second};
use crate::model::IrqRaw;

/// Per-CPU interrupt rates for one interrupt row, aligned by column
/// index and zero-padded to the wider of `prev`/`curr`.
pub fn derive(prev: &IrqRaw, curr: &IrqRaw, interval_cs: u64) -> Vec<f64> {
    let width = prev.per_cpu.len().max(curr.per_cpu.len());
    (0..width)
        .map(|i| {
            let p = prev.per_cpu.get(i).copied().unwrap_or(0);
            let c = curr.per_cpu.get(i).copied().unwrap_or(0);
            rate_per_second(counter_delta(p, c), interval_cs)
        })
        .collect()
}

/// Total interrupt rate across all CPU columns for one row.
pub fn derive_total(prev: &IrqRaw, curr: &IrqRaw, interval_cs: u64) -> f64 {
    derive(prev, curr, interval_cs).iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_per_cpu_rates() {
        let prev = IrqRaw { per_cpu: vec![100, 200] };
        let curr = IrqRaw { per_cpu: vec![150, 260] };
        let rates = derive(&prev, &curr, 100);
        assert_eq!(rates, vec![50.0, 60.0]);
    }

    #[test]
    fn handles_cpu_hotplug_growth() {
        let prev = IrqRaw { per_cpu: vec![100] };
        let curr = IrqRaw { per_cpu: vec![150, 10] };
        let rates = derive(&prev, &curr, 100);
        assert_eq!(rates, vec![50.0, 10.0]);
    }

    #[test]
    fn total_sums_all_columns() {
        let prev = IrqRaw { per_cpu: vec![0, 0] };
        let curr = IrqRaw { per_cpu: vec![10, 20] };
        assert_eq!(derive_total(&prev, &curr, 100), 30.0);
    }
}
