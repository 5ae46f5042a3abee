// crates/pmodcal-core/src/channel.rs

use std::fmt;

use crate::error::{CalError, Result};

/// Number of calibrated channels on the device: 4 inputs then 4 outputs.
pub const CHANNEL_COUNT: usize = 8;

const LABELS: [&str; CHANNEL_COUNT] = ["I0", "I1", "I2", "I3", "O0", "O1", "O2", "O3"];

/// One input/output pin pair on the device under test. Index 0..=7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel(0),
        Channel(1),
        Channel(2),
        Channel(3),
        Channel(4),
        Channel(5),
        Channel(6),
        Channel(7),
    ];

    pub fn new(index: u8) -> Result<Self> {
        if (index as usize) < CHANNEL_COUNT {
            Ok(Channel(index))
        } else {
            Err(CalError::Validation(format!(
                "channel index {} out of range 0..{}",
                index, CHANNEL_COUNT
            )))
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn id(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_input(self) -> bool {
        self.0 < 4
    }

    /// Telemetry label: I0..I3 for inputs, O0..O3 for outputs.
    #[inline]
    pub fn label(self) -> &'static str {
        LABELS[self.index()]
    }

    /// Bit of the jack-detect register that gates this channel.
    #[inline]
    pub fn jack_bit(self) -> u8 {
        1u8 << self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
