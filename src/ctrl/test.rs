use super::Attr;
use crate::stats::Stats;

#[test]
fn attr_names_round_trip() {
    for attr in Attr::ALL {
        assert_eq!(attr.name().parse::<Attr>(), Ok(attr));
        assert_eq!(attr.to_string(), attr.name());
    }
}

#[test]
fn unknown_attr_names_are_rejected() {
    for bad in ["", "sampling", "threshold_mc", "Mode", "stats "] {
        assert!(bad.parse::<Attr>().is_err(), "accepted {bad:?}");
    }
}

#[test]
fn only_stats_is_read_only() {
    assert!(Attr::SamplingMs.writable());
    assert!(Attr::ThresholdMc.writable());
    assert!(Attr::Mode.writable());
    assert!(!Attr::Stats.writable());
}

#[test]
fn stats_text_is_one_line_per_counter() {
    let stats = Stats {
        total_samples: 42,
        threshold_crossings: 7,
    };
    assert_eq!(stats.to_string(), "total_samples=42\nthreshold_crossings=7\n");
}
