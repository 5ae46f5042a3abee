// crates/pmodcal-core/src/cal/transfer.rs

use crate::cal::table::CalEntry;

/// Gain is Q5.10: 1024 is unity.
pub const GAIN_SHIFT: u32 = 10;

/// Symmetric output clamp. Deliberately narrower than full-scale i16.
pub const OUTPUT_LIMIT: i16 = 32000;

/// Calibrated value of one sample, before and after saturation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    /// `((stimulus - offset) * gain) >> GAIN_SHIFT`, unclamped.
    pub raw: i64,
    /// `raw` clamped to `[-OUTPUT_LIMIT, OUTPUT_LIMIT]`.
    pub expected: i16,
    pub saturated: bool,
}

/// Apply one channel's calibration to a stimulus.
///
/// The shift is arithmetic on the signed product, so negative products round
/// toward negative infinity.
pub fn transfer(entry: CalEntry, stimulus: i16) -> Transfer {
    let raw = raw_product(entry, stimulus);
    let lim = OUTPUT_LIMIT as i64;
    let clamped = raw.clamp(-lim, lim);
    Transfer {
        raw,
        expected: clamped as i16,
        saturated: clamped != raw,
    }
}

/// Shorthand for `transfer(entry, stimulus).expected`.
#[inline]
pub fn expected(entry: CalEntry, stimulus: i16) -> i16 {
    transfer(entry, stimulus).expected
}

#[inline]
pub fn raw_product(entry: CalEntry, stimulus: i16) -> i64 {
    let diff = stimulus as i64 - entry.offset as i64;
    (diff * entry.gain as i64) >> GAIN_SHIFT
}
