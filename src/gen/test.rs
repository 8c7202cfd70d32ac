use super::{
    Detector, Generator, NOISE_MAX_MC, NOISE_MIN_MC, NORMAL_MC, RAMP_CEIL_MC, RAMP_FLOOR_MC,
    RAMP_STEP_MC,
};
use crate::config::Mode;

#[test]
fn normal_is_constant() {
    let mut generator = Generator::new();
    for _ in 0..10 {
        assert_eq!(generator.next(Mode::Normal), NORMAL_MC);
    }
}

#[test]
fn noisy_stays_in_range() {
    let mut generator = Generator::new();
    for _ in 0..1000 {
        let temp = generator.next(Mode::Noisy);
        assert!((NOISE_MIN_MC..=NOISE_MAX_MC).contains(&temp));
    }
}

#[test]
fn ramp_steps_and_wraps() {
    let mut generator = Generator::new();

    let first = generator.next(Mode::Ramp);
    assert_eq!(first, RAMP_FLOOR_MC + RAMP_STEP_MC);

    let mut previous = first;
    let mut wrapped = false;
    for _ in 0..400 {
        let temp = generator.next(Mode::Ramp);
        assert!((RAMP_FLOOR_MC..=RAMP_CEIL_MC).contains(&temp));
        if temp < previous {
            // The sawtooth fell back to its floor.
            assert_eq!(temp, RAMP_FLOOR_MC);
            wrapped = true;
        } else {
            assert_eq!(temp, previous + RAMP_STEP_MC);
        }
        previous = temp;
    }
    assert!(wrapped);
}

#[test]
fn ramp_restarts_after_other_mode() {
    let mut generator = Generator::new();
    for _ in 0..50 {
        generator.next(Mode::Ramp);
    }
    generator.next(Mode::Normal);
    assert_eq!(generator.next(Mode::Ramp), RAMP_FLOOR_MC + RAMP_STEP_MC);
}

#[test]
fn detector_flags_transitions_only() {
    let mut detector = Detector::new();

    assert!(detector.check(46_000, 45_000)); // below -> above
    assert!(!detector.check(47_000, 45_000)); // stays above
    assert!(detector.check(44_000, 45_000)); // above -> below
    assert!(!detector.check(43_000, 45_000)); // stays below
}

#[test]
fn detector_treats_equality_as_not_above() {
    let mut detector = Detector::new();

    // Exactly at the threshold from the initial not-above state.
    assert!(!detector.check(45_000, 45_000));

    assert!(detector.check(45_001, 45_000));
    // Falling back to exactly the threshold is a downward crossing.
    assert!(detector.check(45_000, 45_000));
}

#[test]
fn detector_state_survives_threshold_moves() {
    let mut detector = Detector::new();

    assert!(detector.check(30_000, 25_000));
    // Same temperature, threshold raised above it: membership changed.
    assert!(detector.check(30_000, 35_000));
}
