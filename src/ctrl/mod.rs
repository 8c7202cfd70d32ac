#[cfg(test)]
mod test;

use std::fmt;
use std::io::{Error, ErrorKind, Result};
use std::str::FromStr;

use thiserror::Error as ThisError;

use crate::config::{
    Mode, PERIOD_MS_MAX, PERIOD_MS_MIN, THRESHOLD_MC_MAX, THRESHOLD_MC_MIN,
};
use crate::device::Shared;

/// Control-plane attribute names.
///
/// The four attributes form the external configuration contract. However
/// the namespace is surfaced (a sysfs-like directory, an HTTP key/value
/// endpoint, a local socket), values travel as text: reads return the
/// current value with a trailing newline, writes carry the new value and
/// are validated before anything changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attr {
    /// Sampling period in milliseconds. Read/write; a write re-arms the
    /// producer with the new period.
    SamplingMs,

    /// Alert threshold in milli-degrees Celsius. Read/write; the
    /// detector picks it up on the next tick.
    ThresholdMc,

    /// Generation mode name. Read/write; applies from the next tick.
    Mode,

    /// Counter snapshot, `total_samples` and `threshold_crossings` as
    /// one `key=value` line each. Read-only.
    Stats,
}

impl Attr {
    pub const ALL: [Attr; 4] = [Attr::SamplingMs, Attr::ThresholdMc, Attr::Mode, Attr::Stats];

    /// The attribute's name in the control namespace.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SamplingMs => "sampling_ms",
            Self::ThresholdMc => "threshold_mC",
            Self::Mode => "mode",
            Self::Stats => "stats",
        }
    }

    /// Whether writes are accepted at all.
    pub fn writable(&self) -> bool {
        !matches!(self, Self::Stats)
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failed to resolve an attribute name.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
#[error("no attribute named {0:?}")]
pub struct ParseAttrError(String);

impl FromStr for Attr {
    type Err = ParseAttrError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| ParseAttrError(s.into()))
    }
}

/// Renders an attribute's current value. Always safe, never blocks.
pub(crate) fn show(shared: &Shared, attr: Attr) -> String {
    match attr {
        Attr::SamplingMs => format!("{}\n", shared.config.period_ms()),
        Attr::ThresholdMc => format!("{}\n", shared.config.threshold_mc()),
        Attr::Mode => format!("{}\n", shared.config.mode()),
        Attr::Stats => shared.counters.snapshot().to_string(),
    }
}

/// Validates and applies an attribute write.
///
/// A rejected write leaves the attribute untouched and fails with
/// [`ErrorKind::InvalidInput`].
pub(crate) fn store(shared: &Shared, attr: Attr, value: &str) -> Result<()> {
    match attr {
        Attr::SamplingMs => {
            let ms = parse_int::<u32>(value)?;
            if !(PERIOD_MS_MIN..=PERIOD_MS_MAX).contains(&ms) {
                return Err(out_of_range(attr));
            }
            shared.config.set_period_ms(ms);
            // Cancel the pending tick, restart with the new period.
            shared.rearm();
        }
        Attr::ThresholdMc => {
            let mc = parse_int::<i32>(value)?;
            if !(THRESHOLD_MC_MIN..=THRESHOLD_MC_MAX).contains(&mc) {
                return Err(out_of_range(attr));
            }
            shared.config.set_threshold_mc(mc);
        }
        Attr::Mode => {
            let mode = value
                .parse::<Mode>()
                .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
            shared.config.set_mode(mode);
        }
        Attr::Stats => {
            return Err(Error::new(ErrorKind::InvalidInput, "stats is read-only"));
        }
    }
    Ok(())
}

/// Decimal integer grammar shared by the numeric attributes. Tolerates
/// surrounding whitespace, a trailing newline included.
fn parse_int<T: FromStr<Err = std::num::ParseIntError>>(value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e))
}

fn out_of_range(attr: Attr) -> Error {
    Error::new(ErrorKind::InvalidInput, format!("{attr} out of range"))
}
