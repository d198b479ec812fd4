//! PSI derivation. The kernel already computes the rolling `avg10`/
//! `avg60`/`avg300` percentages, so those pass straight through;  the
//! only counter this crate differences itself is the cumulative stall
//! total, turned into a percent-of-wall-clock-time stalled.

use crate::derive::counter_delta;
use crate::model::{PsiLine, PsiRaw};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PsiDerived {
    pub avg10: f64,
    pub avg60: f64,
    pub avg300: f64,
    pub stall_percent: f64,
}

fn derive_line(prev: &PsiLine, curr: &PsiLine, interval_cs: u64) -> PsiDerived {
    let interval_us = interval_cs as f64 * 10_000.0;
    let stall_percent = if interval_us > 0.0 {
        (counter_delta(prev.total_us, curr.total_us) as f64 * 100.0 / interval_us).clamp(0.0, 100.0)
    } else {
        0.0
    };
    PsiDerived { avg10: curr.avg10, avg60: curr.avg60, avg300: curr.avg300, stall_percent }
}

/// Derives `some` (and, when present on both samples, `full`) pressure.
pub fn derive(prev: &PsiRaw, curr: &PsiRaw, interval_cs: u64) -> (PsiDerived, Option<PsiDerived>) {
    let some = derive_line(&prev.some, &curr.some, interval_cs);
    let full = match (prev.full.as_ref(), curr.full.as_ref()) {
        (Some(p), Some(c)) => Some(derive_line(p, c, interval_cs)),
        _ => None,
    };
    (some, full)
}
