//! The shared sample record exchanged through the channel.
//!
//! `SampleRecord` is the PAYLOAD of the mapped segment — the segment holds
//! exactly one record, overwritten in place by the producer and read in
//! place by the consumer. Both processes overlay the same mapped bytes, so
//! the layout here is the wire contract: `#[repr(C)]`, fixed-size fields
//! only (no `String`, `Vec`, pointers), identical field order and widths in
//! every attached process. There is no version negotiation — the layout
//! itself is the protocol version.

use static_assertions::const_assert_eq;

use crate::consts::{RECORD_SIZE, SAMPLE_COUNT};

/// One fixed-size sample record: 10 samples plus a producer timestamp.
///
/// Size: 48 bytes (10×f32 + i64, align 8, no internal padding).
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct SampleRecord {
    /// Sample values, overwritten as a whole on every producer cycle.
    pub values: [f32; SAMPLE_COUNT],
    /// Producer write time, milliseconds since the UNIX epoch.
    pub timestamp_ms: i64,
}

const_assert_eq!(core::mem::size_of::<SampleRecord>(), RECORD_SIZE);
const_assert_eq!(core::mem::align_of::<SampleRecord>(), 8);

impl SampleRecord {
    /// Create a record from its parts.
    pub const fn new(values: [f32; SAMPLE_COUNT], timestamp_ms: i64) -> Self {
        Self {
            values,
            timestamp_ms,
        }
    }
}

impl Default for SampleRecord {
    fn default() -> Self {
        // SAFETY: All fields are numeric primitives or fixed-size arrays
        // of numeric primitives. Zero is a valid value for every field.
        // This matches the segment's zero-initialized birth state.
        unsafe { core::mem::zeroed() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_size_and_alignment() {
        assert_eq!(core::mem::size_of::<SampleRecord>(), 48);
        assert_eq!(core::mem::align_of::<SampleRecord>(), 8);
    }

    #[test]
    fn default_is_zeroed() {
        let rec = SampleRecord::default();
        assert_eq!(rec.values, [0.0; SAMPLE_COUNT]);
        assert_eq!(rec.timestamp_ms, 0);
    }

    #[test]
    fn record_fields() {
        let mut rec = SampleRecord::default();
        for (i, v) in rec.values.iter_mut().enumerate() {
            *v = 1.0 + i as f32;
        }
        rec.timestamp_ms = 1_700_000_000_000;

        assert_eq!(rec.values[0], 1.0);
        assert_eq!(rec.values[9], 10.0);
        assert_eq!(rec.timestamp_ms, 1_700_000_000_000);
    }

    #[test]
    fn copies_are_bitwise_equal() {
        let rec = SampleRecord::new([0.5; SAMPLE_COUNT], 42);
        let copy = rec;
        assert_eq!(rec, copy);
    }
}
