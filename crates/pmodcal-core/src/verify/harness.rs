// crates/pmodcal-core/src/verify/harness.rs

use std::fmt;

use crate::channel::Channel;

/// The two related clocks of the calibration core. `Fs256` runs 256x faster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockDomain {
    Fs,
    Fs256,
}

impl ClockDomain {
    pub fn signal_name(self) -> &'static str {
        match self {
            ClockDomain::Fs => "clk_fs",
            ClockDomain::Fs256 => "clk_256fs",
        }
    }
}

impl fmt::Display for ClockDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signal_name())
    }
}

/// Edge-event subscription. Each call returns once the requested edge has
/// occurred; this is the only place a verification run suspends.
pub trait EdgeEvents {
    fn falling_edge(&mut self, clk: ClockDomain);

    fn rising_edge(&mut self, clk: ClockDomain);

    fn rising_edges(&mut self, clk: ClockDomain, n: usize) {
        for _ in 0..n {
            self.rising_edge(clk);
        }
    }
}

/// Terminal-level access to a calibration unit under test.
///
/// `force_*` drives a terminal until the matching `release_*`; a released
/// terminal returns to whatever the design would see undriven.
pub trait DeviceUnderTest: EdgeEvents {
    fn force_jacks(&mut self, mask: u8);

    fn release_jacks(&mut self);

    fn force_input(&mut self, ch: Channel, raw: u16);

    fn release_input(&mut self, ch: Channel);

    fn read_output(&self, ch: Channel) -> u16;
}
