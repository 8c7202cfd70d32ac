#[cfg(test)]
mod test;

pub(crate) mod rb;

/// Set on every produced sample.
pub const NEW_SAMPLE: u32 = 1;

/// Set on the sample whose temperature moved to the other side of the
/// configured threshold, relative to the previous sample.
pub const THRESHOLD_CROSSED: u32 = 1 << 1;

/// One temperature measurement.
///
/// This is the record the device stream delivers, one whole record per
/// read. On the wire it is 16 bytes, little-endian, without padding:
///
/// ```text
/// offset 0  size 8  timestamp_ns  u64
/// offset 8  size 4  temp_mc       i32
/// offset 12 size 4  flags         u32
/// ```
///
/// `flags` carries [`NEW_SAMPLE`] in bit 0 and [`THRESHOLD_CROSSED`] in
/// bit 1. Bits 2..31 are reserved and zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// `CLOCK_MONOTONIC` timestamp captured at generation.
    pub timestamp_ns: u64,

    /// Temperature in milli-degrees Celsius, e.g. 44123 is 44.123 °C.
    pub temp_mc: i32,

    /// Record flags, see [`NEW_SAMPLE`] and [`THRESHOLD_CROSSED`].
    pub flags: u32,
}

impl Sample {
    /// Size of the encoded record in bytes.
    pub const WIRE_SIZE: usize = 16;

    /// Encodes the record into its 16-byte wire form.
    pub fn to_bytes(&self) -> [u8; Self::WIRE_SIZE] {
        let mut bytes = [0; Self::WIRE_SIZE];
        bytes[0..8].copy_from_slice(&self.timestamp_ns.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.temp_mc.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.flags.to_le_bytes());
        bytes
    }

    /// Decodes a record from its 16-byte wire form.
    pub fn from_bytes(bytes: [u8; Self::WIRE_SIZE]) -> Self {
        let mut timestamp_ns = [0; 8];
        let mut temp_mc = [0; 4];
        let mut flags = [0; 4];
        timestamp_ns.copy_from_slice(&bytes[0..8]);
        temp_mc.copy_from_slice(&bytes[8..12]);
        flags.copy_from_slice(&bytes[12..16]);

        Self {
            timestamp_ns: u64::from_le_bytes(timestamp_ns),
            temp_mc: i32::from_le_bytes(temp_mc),
            flags: u32::from_le_bytes(flags),
        }
    }

    /// Whether this sample marks a threshold crossing.
    pub fn crossed(&self) -> bool {
        self.flags & THRESHOLD_CROSSED != 0
    }
}
