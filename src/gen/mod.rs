#[cfg(test)]
mod test;

mod detector;

pub(crate) use detector::Detector;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Mode;

/// Temperature in [`Mode::Normal`].
pub(crate) const NORMAL_MC: i32 = 25_000;

/// Inclusive noise bounds in [`Mode::Noisy`].
pub(crate) const NOISE_MIN_MC: i32 = 20_000;
pub(crate) const NOISE_MAX_MC: i32 = 30_000;

/// Sawtooth bounds and step in [`Mode::Ramp`].
pub(crate) const RAMP_FLOOR_MC: i32 = 20_000;
pub(crate) const RAMP_CEIL_MC: i32 = 45_000;
pub(crate) const RAMP_STEP_MC: i32 = 123;

/// Synthesizes the temperature series, one value per tick.
///
/// Owned by the producer thread. The ramp phase restarts at the floor
/// whenever ramp mode becomes active after another mode was in effect;
/// the noise source is seeded from OS entropy so separate runs differ.
pub(crate) struct Generator {
    ramp_mc: i32,
    rng: StdRng,
    last_mode: Option<Mode>,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            ramp_mc: RAMP_FLOOR_MC,
            rng: StdRng::from_os_rng(),
            last_mode: None,
        }
    }

    /// Returns the next temperature in milli-degrees Celsius.
    pub fn next(&mut self, mode: Mode) -> i32 {
        if mode == Mode::Ramp && self.last_mode != Some(Mode::Ramp) {
            self.ramp_mc = RAMP_FLOOR_MC;
        }
        self.last_mode = Some(mode);

        match mode {
            Mode::Normal => NORMAL_MC,
            Mode::Noisy => self.rng.random_range(NOISE_MIN_MC..=NOISE_MAX_MC),
            Mode::Ramp => {
                self.ramp_mc += RAMP_STEP_MC;
                if self.ramp_mc > RAMP_CEIL_MC {
                    self.ramp_mc = RAMP_FLOOR_MC;
                }
                self.ramp_mc
            }
        }
    }
}
