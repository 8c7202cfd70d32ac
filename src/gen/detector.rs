/// Threshold edge detector.
///
/// Tracks which side of the alert threshold the previous sample was on.
/// Strict greater-than defines "above", so a sample exactly at the
/// threshold counts as not-above. Only the sample on which membership
/// changes is a crossing, not the ones that stay above afterwards.
///
/// The state deliberately survives mode switches: the first sample of a
/// new mode may flag a crossing against the last sample of the old one.
pub(crate) struct Detector {
    above: bool,
}

impl Detector {
    pub fn new() -> Self {
        Self { above: false }
    }

    /// Feeds one temperature, returns whether it crossed the threshold.
    pub fn check(&mut self, temp_mc: i32, threshold_mc: i32) -> bool {
        let above = temp_mc > threshold_mc;
        let crossed = above != self.above;
        self.above = above;
        crossed
    }
}
