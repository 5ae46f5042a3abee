// crates/pmodcal-core/src/fixed/twos.rs

use crate::error::{CalError, Result};

const MAX_BITS: u32 = 32;

/// Encode a signed sample as the 16-bit two's-complement word seen on a terminal.
#[inline]
pub fn encode(v: i16) -> u16 {
    v as u16
}

/// Decode a 16-bit two's-complement word. Words >= 2^15 are negative.
#[inline]
pub fn decode(raw: u16) -> i16 {
    raw as i16
}

/// Width-generic encode: `v` must fit in a signed `bits`-wide field.
///
/// Negative values map to `2^bits - |v|`, e.g. `to_twos(-1, 4) == 0xF`.
pub fn to_twos(v: i64, bits: u32) -> Result<u64> {
    validate_bits(bits)?;
    let min = -(1i64 << (bits - 1));
    let max = (1i64 << (bits - 1)) - 1;
    if v < min || v > max {
        return Err(CalError::Validation(format!(
            "value {} does not fit in {} bits [{}, {}]",
            v, bits, min, max
        )));
    }
    Ok((v as u64) & mask(bits))
}

/// Width-generic decode: if the sign bit is set, subtract 2^bits.
pub fn from_twos(raw: u64, bits: u32) -> Result<i64> {
    validate_bits(bits)?;
    if raw & !mask(bits) != 0 {
        return Err(CalError::Validation(format!(
            "raw word 0x{:x} wider than {} bits",
            raw, bits
        )));
    }
    let v = raw as i64;
    if v & (1i64 << (bits - 1)) != 0 {
        Ok(v - (1i64 << bits))
    } else {
        Ok(v)
    }
}

#[inline]
fn mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

#[inline]
fn validate_bits(bits: u32) -> Result<()> {
    if bits == 0 || bits > MAX_BITS {
        return Err(CalError::Validation(format!(
            "bit width must be in 1..=32, got {}",
            bits
        )));
    }
    Ok(())
}
