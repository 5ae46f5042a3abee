// crates/pmodcal-core/src/frame/sync.rs

/// Two-byte marker the FPGA emits immediately before the first sample's MSB.
pub const SYNC_MARKER: [u8; 2] = [0xBE, 0xEF];

/// Bytes per encoded sample (big-endian u16).
pub const SAMPLE_BYTES: usize = 2;

/// Index of the first sync marker in `buf`, if any.
pub fn find_marker(buf: &[u8]) -> Option<usize> {
    buf.windows(SYNC_MARKER.len()).position(|w| w == SYNC_MARKER)
}

/// Total bytes needed from the start of `buf` to decode `n` samples after a
/// marker found at `marker_at`.
#[inline]
pub fn frame_end(marker_at: usize, n: usize) -> usize {
    marker_at + SYNC_MARKER.len() + n * SAMPLE_BYTES
}
