use super::{Sample, NEW_SAMPLE, THRESHOLD_CROSSED};

#[test]
fn wire_layout_is_16_bytes_le() {
    let sample = Sample {
        timestamp_ns: 0x1122_3344_5566_7788,
        temp_mc: -1234,
        flags: NEW_SAMPLE | THRESHOLD_CROSSED,
    };
    let bytes = sample.to_bytes();

    assert_eq!(bytes.len(), Sample::WIRE_SIZE);
    assert_eq!(bytes[0..8], 0x1122_3344_5566_7788_u64.to_le_bytes());
    assert_eq!(bytes[8..12], (-1234_i32).to_le_bytes());
    assert_eq!(bytes[12..16], 3_u32.to_le_bytes());
}

#[test]
fn from_bytes_round_trips() {
    let sample = Sample {
        timestamp_ns: 987_654_321,
        temp_mc: 44_123,
        flags: NEW_SAMPLE,
    };
    assert_eq!(Sample::from_bytes(sample.to_bytes()), sample);
}

#[test]
fn crossed_reads_bit_1() {
    let mut sample = Sample {
        timestamp_ns: 0,
        temp_mc: 0,
        flags: NEW_SAMPLE,
    };
    assert!(!sample.crossed());
    sample.flags |= THRESHOLD_CROSSED;
    assert!(sample.crossed());
}
