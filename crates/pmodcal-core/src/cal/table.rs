// crates/pmodcal-core/src/cal/table.rs

use crate::channel::Channel;
use crate::error::{CalError, Result};
use crate::fixed::twos;

/// Per-channel calibration: `out = ((in - offset) * gain) >> 10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CalEntry {
    pub offset: i16,
    pub gain: i16,
}

impl CalEntry {
    pub const UNITY: CalEntry = CalEntry {
        offset: 0,
        gain: 1024,
    };

    pub const fn new(offset: i16, gain: i16) -> Self {
        Self { offset, gain }
    }
}

/// Calibration constants for every channel, loaded once per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalTable {
    entries: Vec<CalEntry>,
}

impl CalTable {
    pub fn from_entries(entries: Vec<CalEntry>) -> Self {
        Self { entries }
    }

    pub fn unity(channels: usize) -> Self {
        Self::from_entries(vec![CalEntry::UNITY; channels])
    }

    /// Parse a calibration memory image.
    ///
    /// Format, one record per line:
    /// - any line containing `//` is a comment
    /// - otherwise the first whitespace-separated token is an address column
    ///   and is ignored; every following token is a 16-bit two's-complement
    ///   hex value
    ///
    /// Values are read as a flat list of `(offset, gain)` pairs in file
    /// order and must total exactly `2 * channels`.
    pub fn parse(text: &str, channels: usize) -> Result<Self> {
        let mut values: Vec<i16> = Vec::with_capacity(channels * 2);

        for (lineno, line) in text.lines().enumerate() {
            if line.contains("//") {
                continue;
            }
            for tok in line.split_whitespace().skip(1) {
                let v = parse_hex16(tok).ok_or_else(|| {
                    CalError::MalformedTable(format!(
                        "line {}: bad hex value {:?}",
                        lineno + 1,
                        tok
                    ))
                })?;
                values.push(v);
            }
        }

        if values.len() != channels * 2 {
            return Err(CalError::MalformedTable(format!(
                "expected {} values ({} channels x offset,gain), got {}",
                channels * 2,
                channels,
                values.len()
            )));
        }

        let entries = values
            .chunks_exact(2)
            .map(|p| CalEntry::new(p[0], p[1]))
            .collect();
        Ok(Self { entries })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, ch: Channel) -> Result<CalEntry> {
        self.entries.get(ch.index()).copied().ok_or_else(|| {
            CalError::Validation(format!(
                "no calibration entry for channel {} (table has {})",
                ch.index(),
                self.entries.len()
            ))
        })
    }

    pub fn entries(&self) -> &[CalEntry] {
        &self.entries
    }

    /// Flat `offset0, gain0, offset1, gain1, ...` view, in file order.
    pub fn flat_values(&self) -> Vec<i16> {
        self.entries
            .iter()
            .flat_map(|e| [e.offset, e.gain])
            .collect()
    }

    /// Render in the same line format `parse` accepts.
    pub fn to_hex_text(&self) -> String {
        let mut s = String::from("// calibration memory: offset gain per channel\n");
        for (i, e) in self.entries.iter().enumerate() {
            s.push_str(&format!(
                "@{:08x} {:04x} {:04x}\n",
                i * 2,
                twos::encode(e.offset),
                twos::encode(e.gain)
            ));
        }
        s
    }

    /// First 16 bytes of BLAKE3 over the little-endian entry encoding.
    pub fn fingerprint_16(&self) -> [u8; 16] {
        let mut b = Vec::with_capacity(self.entries.len() * 4);
        for e in &self.entries {
            b.extend_from_slice(&e.offset.to_le_bytes());
            b.extend_from_slice(&e.gain.to_le_bytes());
        }
        let hash = blake3::hash(&b);
        let mut out = [0u8; 16];
        out.copy_from_slice(&hash.as_bytes()[0..16]);
        out
    }

    pub fn fingerprint_hex(&self) -> String {
        hex16(&self.fingerprint_16())
    }
}

fn parse_hex16(tok: &str) -> Option<i16> {
    let digits = tok
        .strip_prefix("0x")
        .or_else(|| tok.strip_prefix("0X"))
        .unwrap_or(tok);
    if digits.is_empty() || digits.len() > 4 {
        return None;
    }
    u16::from_str_radix(digits, 16).ok().map(twos::decode)
}

fn hex16(id: &[u8; 16]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut s = String::with_capacity(32);
    for &b in id {
        s.push(HEX[(b >> 4) as usize] as char);
        s.push(HEX[(b & 0x0F) as usize] as char);
    }
    s
}
