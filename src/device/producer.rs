use std::time::{Duration, Instant};

use tracing::{info, trace, warn};

use super::Shared;
use crate::ffi::monotonic_ns;
use crate::gen::{Detector, Generator};
use crate::sample::{Sample, NEW_SAMPLE, THRESHOLD_CROSSED};

/// Producer thread body.
///
/// Paces itself on absolute monotonic deadlines so the cadence does not
/// drift with the cost of a tick. Between ticks it sleeps on the pacer
/// condvar, which the control plane pokes after a period change and the
/// device pokes on shutdown; both cases are re-checked before the next
/// deadline is armed, so a new period takes effect within one new period
/// of the write.
pub(crate) fn run(shared: &Shared) {
    let mut generator = Generator::new();
    let mut detector = Detector::new();

    let mut period = period_of(shared);
    let mut deadline = Instant::now() + period;

    loop {
        let mut pacer = shared.pacer();
        loop {
            if !shared.is_running() {
                return;
            }
            if pacer.rearm {
                pacer.rearm = false;
                period = period_of(shared);
                deadline = Instant::now() + period;
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            pacer = shared.wait_tick(pacer, deadline - now);
        }
        drop(pacer);

        tick(shared, &mut generator, &mut detector);

        deadline += period;
        let now = Instant::now();
        if deadline < now {
            // A stalled consumer handler or scheduler delay pushed us a
            // whole period behind. Re-base instead of bursting.
            trace!("tick overrun, re-basing cadence");
            deadline = now + period;
        }
    }
}

fn period_of(shared: &Shared) -> Duration {
    Duration::from_millis(shared.config.period_ms() as u64)
}

/// One tick: generate, detect, push, wake.
fn tick(shared: &Shared, generator: &mut Generator, detector: &mut Detector) {
    let mode = shared.config.mode();
    let threshold_mc = shared.config.threshold_mc();

    let timestamp_ns = match monotonic_ns() {
        Ok(ns) => ns,
        Err(error) => {
            // No retry, the next tick supersedes. Counters hold still.
            warn!(%error, "clock read failed, tick skipped");
            return;
        }
    };

    let temp_mc = generator.next(mode);
    let mut flags = NEW_SAMPLE;

    if detector.check(temp_mc, threshold_mc) {
        flags |= THRESHOLD_CROSSED;
        shared.counters.count_crossing();
        info!(
            temp_mc,
            threshold_mc,
            direction = if temp_mc > threshold_mc { "up" } else { "down" },
            "threshold crossed"
        );
    }

    let sample = Sample {
        timestamp_ns,
        temp_mc,
        flags,
    };

    shared.rb().push(sample);
    shared.counters.count_sample();

    // After the ring lock is back down.
    shared.wake_readers();
}
