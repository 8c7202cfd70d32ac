use super::{
    Config, Mode, SharedConfig, DEFAULT_MODE, DEFAULT_PERIOD_MS, DEFAULT_THRESHOLD_MC,
};

#[test]
fn mode_parses_canonical_names() {
    assert_eq!("normal".parse(), Ok(Mode::Normal));
    assert_eq!("noisy".parse(), Ok(Mode::Noisy));
    assert_eq!("ramp".parse(), Ok(Mode::Ramp));
}

#[test]
fn mode_tolerates_one_trailing_newline() {
    assert_eq!("ramp\n".parse(), Ok(Mode::Ramp));
    assert!("ramp\n\n".parse::<Mode>().is_err());
}

#[test]
fn mode_rejects_everything_else() {
    for bad in ["", "Ramp", "ramped", " ramp", "rampp", "unknown"] {
        assert!(bad.parse::<Mode>().is_err(), "accepted {bad:?}");
    }
}

#[test]
fn mode_displays_its_name() {
    assert_eq!(Mode::Normal.to_string(), "normal");
    assert_eq!(Mode::Noisy.to_string(), "noisy");
    assert_eq!(Mode::Ramp.to_string(), "ramp");
}

#[test]
fn defaults_match_the_device_contract() {
    let config = Config::default();
    assert_eq!(config.period_ms, DEFAULT_PERIOD_MS);
    assert_eq!(config.threshold_mc, DEFAULT_THRESHOLD_MC);
    assert_eq!(config.mode, DEFAULT_MODE);
    assert_eq!(config.period_ms, 100);
    assert_eq!(config.threshold_mc, 45_000);
    assert_eq!(config.mode, Mode::Ramp);
}

#[test]
fn shared_config_round_trips() {
    let shared = SharedConfig::new(Config::default());

    shared.set_period_ms(250);
    shared.set_threshold_mc(-1_500);
    shared.set_mode(Mode::Noisy);

    assert_eq!(shared.period_ms(), 250);
    assert_eq!(shared.threshold_mc(), -1_500);
    assert_eq!(shared.mode(), Mode::Noisy);

    let snapshot = shared.snapshot();
    assert_eq!(
        snapshot,
        Config {
            period_ms: 250,
            threshold_mc: -1_500,
            mode: Mode::Noisy,
        }
    );
}
