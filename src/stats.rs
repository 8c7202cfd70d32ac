use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of the device counters.
///
/// Both counters are monotonically non-decreasing over the lifetime of a
/// device. `total_samples` counts every produced sample, including ones
/// the ring later overwrote before any reader got to them, so comparing
/// its delta against the number of records actually read reveals how many
/// samples were lost to overwrite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub total_samples: u64,
    pub threshold_crossings: u64,
}

impl fmt::Display for Stats {
    /// The `stats` attribute text, one `key=value` line per counter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total_samples={}", self.total_samples)?;
        writeln!(f, "threshold_crossings={}", self.threshold_crossings)
    }
}

/// Producer-side counters, read by anyone without locking.
///
/// Increments happen on the producer thread only. Snapshots use relaxed
/// loads and may trail the producer by a tick, which is fine for a
/// statistics surface.
pub(crate) struct Counters {
    total_samples: AtomicU64,
    threshold_crossings: AtomicU64,
}

impl Counters {
    pub fn new() -> Self {
        Self {
            total_samples: AtomicU64::new(0),
            threshold_crossings: AtomicU64::new(0),
        }
    }

    pub fn count_sample(&self) {
        self.total_samples.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count_crossing(&self) {
        self.threshold_crossings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> Stats {
        Stats {
            total_samples: self.total_samples.load(Ordering::Relaxed),
            threshold_crossings: self.threshold_crossings.load(Ordering::Relaxed),
        }
    }
}
