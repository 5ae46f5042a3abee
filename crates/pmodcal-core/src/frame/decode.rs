// crates/pmodcal-core/src/frame/decode.rs

use crate::channel::Channel;
use crate::error::{CalError, Result};
use crate::fixed::twos;
use crate::frame::sync::{find_marker, frame_end, SAMPLE_BYTES, SYNC_MARKER};

/// One synchronized telemetry frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Offset of the sync marker inside the window it was decoded from.
    pub marker_at: usize,
    /// Signed samples in channel order (I0..I3, O0..O3 for an 8-channel frame).
    pub samples: Vec<i16>,
}

impl Frame {
    /// Samples paired with their channel. Frames wider than the device's
    /// channel enumeration stop at the last known channel.
    pub fn labelled(&self) -> impl Iterator<Item = (Channel, i16)> + '_ {
        Channel::ALL.iter().copied().zip(self.samples.iter().copied())
    }

    /// The raw 16-bit words the samples were decoded from.
    pub fn raw_words(&self) -> impl Iterator<Item = u16> + '_ {
        self.samples.iter().map(|&s| twos::encode(s))
    }
}

/// Decode `n` big-endian two's-complement samples following the first sync
/// marker in `buf`.
///
/// Fails with `Framing` when no marker is present and with `BufferUnderrun`
/// when the window ends before `n` samples are available. Both are per-window
/// conditions; the caller retries with the next window.
pub fn decode_frame(buf: &[u8], n: usize) -> Result<Frame> {
    let marker_at = find_marker(buf).ok_or(CalError::Framing { window: buf.len() })?;

    let need = frame_end(marker_at, n);
    if buf.len() < need {
        return Err(CalError::BufferUnderrun {
            need,
            got: buf.len(),
        });
    }

    let start = marker_at + SYNC_MARKER.len();
    let samples = buf[start..need]
        .chunks_exact(SAMPLE_BYTES)
        .map(|w| twos::decode(u16::from_be_bytes([w[0], w[1]])))
        .collect();

    Ok(Frame { marker_at, samples })
}
