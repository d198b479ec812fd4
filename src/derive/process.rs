//! Process CPU percentage derivation, with an Irix/Solaris mode toggle:
//! Irix mode reports CPU time as a percentage of one CPU (so a process
//! pinned across cores can exceed 100%), Solaris mode divides by the
//! online CPU count so the whole system sums to 100%.

use crate::derive::{counter_delta, rate_per_second};
use crate::model::TaskRaw;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaskDerived {
    pub cpu_percent: f64,
    pub user_percent: f64,
    pub system_percent: f64,
    pub guest_percent: f64,
    pub minflt_per_s: f64,
    pub majflt_per_s: f64,
    pub read_kb_per_s: f64,
    pub write_kb_per_s: f64,
    pub voluntary_ctxsw_per_s: f64,
    pub involuntary_ctxsw_per_s: f64,
}

/// Derives per-task statistics over `interval_cs` centiseconds.
/// `nr_cpus` is ignored when `irix_mode` is true.
pub fn derive(prev: &TaskRaw, curr: &TaskRaw, interval_cs: u64, nr_cpus: u64, irix_mode: bool) -> TaskDerived {
    // Guest time is already folded into `utime` by the kernel, so it
    // must be subtracted back out here or it is reported twice: once
    // inside `user_percent`, once again in `guest_percent`. A regression
    // in either term (or in their difference) clamps to zero rather than
    // wrapping.
    let curr_user_nonguest = curr.utime.saturating_sub(curr.gtime);
    let prev_user_nonguest = prev.utime.saturating_sub(prev.gtime);
    let user_delta = curr_user_nonguest.saturating_sub(prev_user_nonguest);
    let system_delta = counter_delta(prev.stime, curr.stime);
    let guest_delta = counter_delta(prev.gtime, curr.gtime);

    let scale = |pct: f64| -> f64 {
        if irix_mode || nr_cpus == 0 {
            pct
        } else {
            pct / nr_cpus as f64
        }
    };

    let user_percent = scale(rate_per_second(user_delta, interval_cs));
    let system_percent = scale(rate_per_second(system_delta, interval_cs));
    let guest_percent = scale(rate_per_second(guest_delta, interval_cs));

    TaskDerived {
        cpu_percent: user_percent + system_percent,
        user_percent,
        system_percent,
        guest_percent,
        minflt_per_s: rate_per_second(counter_delta(prev.minflt, curr.minflt), interval_cs),
        majflt_per_s: rate_per_second(counter_delta(prev.majflt, curr.majflt), interval_cs),
        read_kb_per_s: rate_per_second(counter_delta(prev.read_bytes, curr.read_bytes), interval_cs) / 1024.0,
        write_kb_per_s: rate_per_second(counter_delta(prev.write_bytes, curr.write_bytes), interval_cs) / 1024.0,
        voluntary_ctxsw_per_s: rate_per_second(counter_delta(prev.nvcsw, curr.nvcsw), interval_cs),
        involuntary_ctxsw_per_s: rate_per_second(counter_delta(prev.nivcsw, curr.nivcsw), interval_cs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(utime: u64, stime: u64) -> TaskRaw {
        TaskRaw { utime, stime, ..Default::default() }
    }

    #[test]
    fn irix_mode_can_exceed_100_percent() {
        let prev = task(0, 0);
        let curr = task(300, 0);
        // 1 second interval, 300 jiffies of user time on a 100Hz clock
        // spread across 3 cores: 300%.
        let d = derive(&prev, &curr, 100, 4, true);
        assert_eq!(d.cpu_percent, 300.0);
    }

    #[test]
    fn solaris_mode_divides_by_cpu_count() {
        let prev = task(0, 0);
        let curr = task(300, 0);
        let d = derive(&prev, &curr, 100, 4, false);
        assert_eq!(d.cpu_percent, 75.0);
    }

    #[test]
    fn single_cpu_percent_bound_in_irix_mode_is_at_most_100() {
        let prev = task(0, 0);
        let curr = task(100, 0);
        let d = derive(&prev, &curr, 100, 1, true);
        assert!(d.cpu_percent <= 100.0);
    }

    #[test]
    fn guest_time_is_excluded_from_user_percent() {
        // utime includes 50 jiffies of guest time; user_percent should
        // only reflect the other 50.
        let prev = TaskRaw { utime: 0, gtime: 0, ..Default::default() };
        let curr = TaskRaw { utime: 100, gtime: 50, ..Default::default() };
        let d = derive(&prev, &curr, 100, 1, true);
        assert_eq!(d.user_percent, 50.0);
        assert_eq!(d.guest_percent, 50.0);
    }

    #[test]
    fn user_percent_regression_clamps_to_zero() {
        let prev = TaskRaw { utime: 500, gtime: 0, ..Default::default() };
        let curr = TaskRaw { utime: 10, gtime: 0, ..Default::default() };
        let d = derive(&prev, &curr, 100, 1, true);
        assert_eq!(d.user_percent, 0.0);
    }
}
