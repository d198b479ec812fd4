//! Sampling Scheduler: drives the
//! `INIT -> FIRST_SAMPLE -> WAIT -> SAMPLE -> WAIT -> ... -> TERMINATING`
//! state machine. Cancellation is an `AtomicBool` flipped by a `ctrlc`
//! handler, checked in 100ms slices while sleeping so shutdown is
//! responsive even on a long interval, and the sleep is re-armed only
//! after the previous tick's work has returned.

use crate::error::FatalError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// States of the sampling scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Init,
    FirstSample,
    Wait,
    Sample,
    Terminating,
}

/// Frozen sampling parameters, resolved once at startup.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// Centiseconds between samples. `0` means "since boot" mode: take
    /// exactly one sample against the kernel's own boot-to-now baseline
    /// and stop.
    pub interval_cs: u64,
    /// Total number of samples to emit. `None` runs until cancelled.
    pub count: Option<u32>,
    /// When true, the first sample only seeds the registry's baseline
    /// and is never handed to the sink.
    pub skip_first_sample: bool,
}

impl SchedulerConfig {
    pub fn since_boot() -> Self {
        Self { interval_cs: 0, count: Some(1), skip_first_sample: false }
    }
}

/// Abstraction over sleeping, so scheduler tests run without waiting on
/// a real clock.
pub trait Clock: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the real OS clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealClock;

impl Clock for RealClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// How finely the scheduler slices its wait so a cancellation request is
/// noticed promptly even on a long `--interval`.
const WAIT_SLICE: Duration = Duration::from_millis(100);

pub struct Scheduler<C: Clock = RealClock> {
    config: SchedulerConfig,
    clock: C,
    cancelled: Arc<AtomicBool>,
}

impl Scheduler<RealClock> {
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_clock(config, RealClock)
    }

    /// Installs a SIGINT/SIGTERM handler that flips the scheduler's
    /// cancellation flag. Front-ends that also need to cancel on a
    /// child process exiting should flip [`Scheduler::cancel_handle`]
    /// themselves from their SIGCHLD handling.
    pub fn install_signal_handler(&self) -> Result<(), ctrlc::Error> {
        let flag = self.cancelled.clone();
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
    }
}

impl<C: Clock> Scheduler<C> {
    pub fn with_clock(config: SchedulerConfig, clock: C) -> Self {
        Self { config, clock, cancelled: Arc::new(AtomicBool::new(false)) }
    }

    /// A handle callers can flip independently of SIGINT/SIGTERM (e.g.
    /// on a child process's SIGCHLD).
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Runs the state machine to completion, calling `tick(is_first)`
    /// once per sample. Returns the number of samples actually handed to
    /// `tick` with `is_first == false` plus, when not in skip-first
    /// mode, the leading `true` call — i.e. the total number of ticks.
    pub fn run(&self, mut tick: impl FnMut(bool) -> Result<(), FatalError>) -> Result<u32, FatalError> {
        let mut state = SchedulerState::Init;
        let mut samples_taken: u32 = 0;

        loop {
            state = match state {
                SchedulerState::Init => SchedulerState::FirstSample,

                SchedulerState::FirstSample => {
                    tick(true)?;
                    if !self.config.skip_first_sample {
                        samples_taken += 1;
                    }
                    self.next_after_sample(samples_taken)
                }

                SchedulerState::Wait => {
                    if self.is_cancelled() {
                        SchedulerState::Terminating
                    } else {
                        self.sleep_interruptible();
                        if self.is_cancelled() {
                            SchedulerState::Terminating
                        } else {
                            SchedulerState::Sample
                        }
                    }
                }

                SchedulerState::Sample => {
                    tick(false)?;
                    samples_taken += 1;
                    self.next_after_sample(samples_taken)
                }

                SchedulerState::Terminating => break,
            };
        }
        Ok(samples_taken)
    }

    fn next_after_sample(&self, samples_taken: u32) -> SchedulerState {
        if self.config.interval_cs == 0 {
            return SchedulerState::Terminating;
        }
        if let Some(limit) = self.config.count {
            if samples_taken >= limit {
                return SchedulerState::Terminating;
            }
        }
        if self.is_cancelled() {
            return SchedulerState::Terminating;
        }
        SchedulerState::Wait
    }

    fn sleep_interruptible(&self) {
        let total = Duration::from_millis(self.config.interval_cs * 10);
        let mut remaining = total;
        while remaining > Duration::ZERO && !self.is_cancelled() {
            let slice = remaining.min(WAIT_SLICE);
            self.clock.sleep(slice);
            remaining = remaining.saturating_sub(slice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Clock that advances instantly and records how long it was asked
    /// to sleep, so interval pacing is testable without real delays.
    #[derive(Default)]
    struct FakeClock {
        slept: Mutex<Duration>,
    }

    impl Clock for FakeClock {
        fn sleep(&self, duration: Duration) {
            *self.slept.lock().unwrap() += duration;
        }
    }

    #[test]
    fn since_boot_mode_takes_exactly_one_sample() {
        let scheduler = Scheduler::with_clock(SchedulerConfig::since_boot(), FakeClock::default());
        let mut ticks = Vec::new();
        let taken = scheduler.run(|is_first| {
            ticks.push(is_first);
            Ok(())
        }).unwrap();
        assert_eq!(taken, 1);
        assert_eq!(ticks, vec![true]);
    }

    #[test]
    fn count_bounded_run_stops_at_the_limit() {
        let config = SchedulerConfig { interval_cs: 100, count: Some(3), skip_first_sample: false };
        let scheduler = Scheduler::with_clock(config, FakeClock::default());
        let mut ticks = 0;
        let taken = scheduler.run(|_| {
            ticks += 1;
            Ok(())
        }).unwrap();
        assert_eq!(taken, 3);
        assert_eq!(ticks, 3);
    }

    #[test]
    fn skip_first_sample_does_not_count_toward_the_limit() {
        let config = SchedulerConfig { interval_cs: 100, count: Some(2), skip_first_sample: true };
        let scheduler = Scheduler::with_clock(config, FakeClock::default());
        let mut is_first_flags = Vec::new();
        let taken = scheduler.run(|is_first| {
            is_first_flags.push(is_first);
            Ok(())
        }).unwrap();
        // One silent baseline tick plus two counted samples.
        assert_eq!(taken, 2);
        assert_eq!(is_first_flags, vec![true, false, false]);
    }

    #[test]
    fn cancellation_during_wait_stops_the_run() {
        let config = SchedulerConfig { interval_cs: 1000, count: None, skip_first_sample: false };
        let scheduler = Scheduler::with_clock(config, FakeClock::default());
        let cancel = scheduler.cancel_handle();
        let mut ticks = 0;
        let taken = scheduler.run(|_| {
            ticks += 1;
            if ticks == 1 {
                cancel.store(true, Ordering::SeqCst);
            }
            Ok(())
        }).unwrap();
        assert_eq!(taken, 1);
    }

    #[test]
    fn propagates_fatal_error_from_tick() {
        let scheduler = Scheduler::with_clock(SchedulerConfig::since_boot(), FakeClock::default());
        let result = scheduler.run(|_| Err(FatalError::Allocation));
        assert!(result.is_err());
    }
}
