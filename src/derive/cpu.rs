//! CPU percentage derivation, including the per-CPU interval
//! recomputation that corrects for guest-time double counting and for
//! CPUs that went offline and back online mid-interval.

use crate::model::CpuRaw;

/// Sum of the eight user-visible jiffy counters (guest time excluded —
/// it is already folded into `user`/`nice`), used both as the "is this
/// CPU online" signal and as the per-CPU interval denominator.
pub fn total_jiffies(c: &CpuRaw) -> u64 {
    c.user + c.nice + c.system + c.idle + c.iowait + c.irq + c.softirq + c.steal
}

/// Recomputes the jiffy interval for one CPU row, correcting for the
/// guest-time skew `get_per_cpu_interval` guards against: the kernel can
/// report a decrease in (user - guest) or (nice - guest_nice) between
/// samples even though the CPU's total jiffy count increased, because
/// guest time can be charged faster than real time advances. When that
/// happens the shortfall is added back into the interval.
///
/// Returns at least `1` so callers can divide by it unconditionally;
/// callers that need true tickless detection should check
/// `total_jiffies(curr) == total_jiffies(prev)` themselves before
/// calling this.
pub fn per_cpu_interval(prev: &CpuRaw, curr: &CpuRaw) -> u64 {
    let prev_total = total_jiffies(prev);
    let curr_total = total_jiffies(curr);
    let itv = if curr_total >= prev_total {
        curr_total - prev_total
    } else {
        // CPU went offline and came back online; its counters restarted.
        curr_total
    };

    let mut ishift: i64 = 0;
    let curr_user_nonguest = curr.user.saturating_sub(curr.guest);
    let prev_user_nonguest = prev.user.saturating_sub(prev.guest);
    if curr_user_nonguest < prev_user_nonguest {
        ishift += (prev_user_nonguest - curr_user_nonguest) as i64;
    }
    let curr_nice_nonguest = curr.nice.saturating_sub(curr.guest_nice);
    let prev_nice_nonguest = prev.nice.saturating_sub(prev.guest_nice);
    if curr_nice_nonguest < prev_nice_nonguest {
        ishift += (prev_nice_nonguest - curr_nice_nonguest) as i64;
    }

    let corrected = itv as i64 - ishift;
    if corrected > 0 {
        corrected as u64
    } else {
        1
    }
}

/// `iowait` regresses (reported lower than the previous sample) when a
/// CPU transitions offline-to-online, since the kernel resets its
/// per-CPU iowait accumulator. A regression is only treated that way
/// when `prev.iowait` is far from wrapping (`u64::MAX - 0x7ffff`) — a
/// counter that's actually near its maximum and wraps is a different
/// situation the derivation doesn't special-case here, since jiffy
/// counters at `u64` width do not wrap in practice.
pub fn iowait_delta(prev: &CpuRaw, curr: &CpuRaw) -> u64 {
    if curr.iowait < prev.iowait {
        if prev.iowait < (u64::MAX - 0x7ffff) {
            return 0;
        }
        return curr.iowait;
    }
    curr.iowait - prev.iowait
}

/// One CPU row's percentages for a sample interval. `idle` alone absorbs
/// the tickless case where no jiffies elapsed at all.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuPercent {
    pub user: f64,
    pub nice: f64,
    pub system: f64,
    pub iowait: f64,
    pub irq: f64,
    pub softirq: f64,
    pub steal: f64,
    pub guest: f64,
    pub guest_nice: f64,
    pub idle: f64,
}

/// Derives CPU percentages for one row. A CPU that accumulated zero
/// jiffies over the interval (fully idle and tickless) reports 100% idle
/// rather than `0/0`.
pub fn derive_percent(prev: &CpuRaw, curr: &CpuRaw) -> CpuPercent {
    let itv = per_cpu_interval(prev, curr);
    if total_jiffies(curr).saturating_sub(total_jiffies(prev)) == 0 && curr.idle >= prev.idle {
        return CpuPercent { idle: 100.0, ..Default::default() };
    }

    // Every field but `iowait` clamps a regression to zero rather than
    // treating it as a reset: `iowait` has its own offline-transition
    // handling in `iowait_delta`, since it is the one field the kernel
    // is known to reset in place on a CPU coming back online.
    use crate::derive::{clamped_delta, percent};
    CpuPercent {
        user: percent(clamped_delta(prev.user, curr.user).saturating_sub(clamped_delta(prev.guest, curr.guest)), itv),
        nice: percent(
            clamped_delta(prev.nice, curr.nice).saturating_sub(clamped_delta(prev.guest_nice, curr.guest_nice)),
            itv,
        ),
        system: percent(clamped_delta(prev.system, curr.system), itv),
        iowait: percent(iowait_delta(prev, curr), itv),
        irq: percent(clamped_delta(prev.irq, curr.irq), itv),
        softirq: percent(clamped_delta(prev.softirq, curr.softirq), itv),
        steal: percent(clamped_delta(prev.steal, curr.steal), itv),
        guest: percent(clamped_delta(prev.guest, curr.guest), itv),
        guest_nice: percent(clamped_delta(prev.guest_nice, curr.guest_nice), itv),
        idle: percent(clamped_delta(prev.idle, curr.idle), itv),
    }
}

/// Sums raw counters across a set of per-CPU rows belonging to the same
/// NUMA node, so the same [`derive_percent`] function can be reused for
/// node-level aggregation.
pub fn aggregate(rows: impl IntoIterator<Item = CpuRaw>) -> CpuRaw {
    let mut total = CpuRaw::default();
    for row in rows {
        total.user += row.user;
        total.nice += row.nice;
        total.system += row.system;
        total.idle += row.idle;
        total.iowait += row.iowait;
        total.irq += row.irq;
        total.softirq += row.softirq;
        total.steal += row.steal;
        total.guest += row.guest;
        total.guest_nice += row.guest_nice;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu(user: u64, nice: u64, system: u64, idle: u64, iowait: u64) -> CpuRaw {
        CpuRaw { user, nice, system, idle, iowait, ..Default::default() }
    }

    #[test]
    fn busy_cpu_percentages_sum_near_100() {
        let prev = cpu(1000, 100, 500, 8000, 400);
        let curr = cpu(1100, 110, 550, 8300, 420);
        let pct = derive_percent(&prev, &curr);
        let sum = pct.user + pct.nice + pct.system + pct.iowait + pct.idle;
        assert!((99.0..=101.0).contains(&sum), "sum was {sum}");
    }

    #[test]
    fn tickless_cpu_is_fully_idle() {
        let row = cpu(100, 0, 50, 9850, 0);
        let pct = derive_percent(&row, &row);
        assert_eq!(pct.idle, 100.0);
        assert_eq!(pct.user, 0.0);
    }

    #[test]
    fn offline_then_online_cpu_restarts_from_its_own_counters() {
        let prev = cpu(5000, 0, 2000, 90000, 100);
        // Reset to near-zero after coming back online.
        let curr = cpu(10, 0, 5, 980, 0);
        let itv = per_cpu_interval(&prev, &curr);
        assert_eq!(itv, total_jiffies(&curr));
    }

    #[test]
    fn iowait_regression_near_reset_is_zeroed() {
        let prev = CpuRaw { iowait: 500, ..Default::default() };
        let curr = CpuRaw { iowait: 10, ..Default::default() };
        assert_eq!(iowait_delta(&prev, &curr), 0);
    }

    #[test]
    fn guest_time_skew_is_added_back_into_interval() {
        // curr (user - guest) dropped even though total jiffies rose.
        let prev = CpuRaw { user: 1000, guest: 100, idle: 9000, ..Default::default() };
        let curr = CpuRaw { user: 1050, guest: 200, idle: 9100, ..Default::default() };
        let naive_itv = total_jiffies(&curr) - total_jiffies(&prev);
        let corrected = per_cpu_interval(&prev, &curr);
        assert!(corrected > naive_itv);
    }

    #[test]
    fn steal_regression_clamps_to_zero_not_a_spurious_spike() {
        let prev = CpuRaw { user: 1000, idle: 9000, steal: 500, ..Default::default() };
        let curr = CpuRaw { user: 1100, idle: 9100, steal: 10, ..Default::default() };
        let pct = derive_percent(&prev, &curr);
        assert_eq!(pct.steal, 0.0);
    }

    #[test]
    fn numa_aggregate_sums_member_cpus() {
        let a = cpu(100, 0, 50, 800, 10);
        let b = cpu(200, 0, 100, 1600, 20);
        let total = aggregate([a, b]);
        assert_eq!(total.user, 300);
        assert_eq!(total.idle, 2400);
    }
}
