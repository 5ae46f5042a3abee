// crates/pmodcal-core/src/verify/stimulus.rs

/// Stimulus applied to every channel unless the caller supplies its own set.
/// Covers a mid-scale positive, a mid-scale negative and both clamp edges.
pub const DEFAULT_STIMULUS: [i16; 4] = [23173, -14928, 32000, -32000];

/// Jack-detect mask with every jack reported as plugged in.
pub const ALL_JACKS: u8 = 0xFF;
