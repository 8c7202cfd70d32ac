#[cfg(test)]
mod test;

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI32, AtomicU32, AtomicU8, Ordering};

use thiserror::Error;

/// Sampling period bounds in milliseconds.
pub const PERIOD_MS_MIN: u32 = 1;
pub const PERIOD_MS_MAX: u32 = 10_000;

/// Alert threshold bounds in milli-degrees Celsius.
pub const THRESHOLD_MC_MIN: i32 = -50_000;
pub const THRESHOLD_MC_MAX: i32 = 150_000;

pub const DEFAULT_PERIOD_MS: u32 = 100;
pub const DEFAULT_THRESHOLD_MC: i32 = 45_000;
pub const DEFAULT_MODE: Mode = Mode::Ramp;

/// Temperature generation mode.
///
/// The textual names below are the canonical control-plane representation,
/// see [`Attr::Mode`][crate::ctrl::Attr::Mode].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Constant 25.000 °C.
    Normal,

    /// Uniform noise in [20.000, 30.000] °C, independent per sample.
    Noisy,

    /// Sawtooth from 20.000 °C to 45.000 °C in 0.123 °C steps.
    Ramp,
}

/// Failed to parse a [`Mode`] name.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown mode {0:?}")]
pub struct ParseModeError(String);

impl Mode {
    /// The canonical attribute value for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Noisy => "noisy",
            Self::Ramp => "ramp",
        }
    }

    pub(crate) fn to_u8(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Noisy => 1,
            Self::Ramp => 2,
        }
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Normal,
            1 => Self::Noisy,
            _ => Self::Ramp,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    /// Accepts exactly `normal`, `noisy` or `ramp`, with at most one
    /// trailing newline. Attribute writers commonly leave one behind
    /// (`echo ramp > mode`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_suffix('\n').unwrap_or(s) {
            "normal" => Ok(Self::Normal),
            "noisy" => Ok(Self::Noisy),
            "ramp" => Ok(Self::Ramp),
            other => Err(ParseModeError(other.into())),
        }
    }
}

/// Snapshot of the runtime-tunable device configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Sampling period in milliseconds, within
    /// [`PERIOD_MS_MIN`]..=[`PERIOD_MS_MAX`].
    pub period_ms: u32,

    /// Alert threshold in milli-degrees Celsius, within
    /// [`THRESHOLD_MC_MIN`]..=[`THRESHOLD_MC_MAX`].
    pub threshold_mc: i32,

    /// Temperature generation mode.
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD_MS,
            threshold_mc: DEFAULT_THRESHOLD_MC,
            mode: DEFAULT_MODE,
        }
    }
}

/// Configuration cell shared between the control plane and the producer.
///
/// Plain atomic scalars: the producer reads each one once per tick, the
/// control plane stores whole validated values. No tick ever observes a
/// half-written configuration.
pub(crate) struct SharedConfig {
    period_ms: AtomicU32,
    threshold_mc: AtomicI32,
    mode: AtomicU8,
}

impl SharedConfig {
    pub fn new(config: Config) -> Self {
        Self {
            period_ms: AtomicU32::new(config.period_ms),
            threshold_mc: AtomicI32::new(config.threshold_mc),
            mode: AtomicU8::new(config.mode.to_u8()),
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms.load(Ordering::Relaxed)
    }

    pub fn set_period_ms(&self, ms: u32) {
        self.period_ms.store(ms, Ordering::Relaxed);
    }

    pub fn threshold_mc(&self) -> i32 {
        self.threshold_mc.load(Ordering::Relaxed)
    }

    pub fn set_threshold_mc(&self, mc: i32) {
        self.threshold_mc.store(mc, Ordering::Relaxed);
    }

    pub fn mode(&self) -> Mode {
        Mode::from_u8(self.mode.load(Ordering::Relaxed))
    }

    pub fn set_mode(&self, mode: Mode) {
        self.mode.store(mode.to_u8(), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> Config {
        Config {
            period_ms: self.period_ms(),
            threshold_mc: self.threshold_mc(),
            mode: self.mode(),
        }
    }
}
