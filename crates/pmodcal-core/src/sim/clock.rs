// crates/pmodcal-core/src/sim/clock.rs

use crate::error::{CalError, Result};

/// 12 MHz-ish audio master clock period, in picoseconds.
pub const CLK_256FS_PERIOD_PS: u64 = 83_000;

/// Sample clock: one period per 256 master clock periods.
pub const CLK_FS_PERIOD_PS: u64 = CLK_256FS_PERIOD_PS * 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Rising,
    Falling,
}

/// Free-running square wave on a picosecond timeline.
///
/// The level set at t=0 is not an edge. Edge `k` (k >= 1) happens at
/// `k * period/2` and toggles the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockGen {
    pub period_ps: u64,
    pub start_high: bool,
}

impl ClockGen {
    /// Both half periods must be whole picoseconds.
    pub fn new(period_ps: u64, start_high: bool) -> Result<Self> {
        if period_ps == 0 || period_ps % 2 != 0 {
            return Err(CalError::Validation(format!(
                "clock period must be even and non-zero, got {period_ps} ps"
            )));
        }
        Ok(Self {
            period_ps,
            start_high,
        })
    }

    pub fn clk_256fs() -> Self {
        Self {
            period_ps: CLK_256FS_PERIOD_PS,
            start_high: true,
        }
    }

    pub fn clk_fs() -> Self {
        Self {
            period_ps: CLK_FS_PERIOD_PS,
            start_high: false,
        }
    }

    #[inline]
    pub fn half_period_ps(&self) -> u64 {
        self.period_ps / 2
    }

    /// Level at time `t`, after any edge scheduled exactly at `t`.
    pub fn level_at(&self, t: u64) -> bool {
        let k = t / self.half_period_ps();
        self.start_high ^ (k % 2 == 1)
    }

    /// First edge strictly after `t`.
    pub fn next_edge_after(&self, t: u64) -> (u64, Edge) {
        let half = self.half_period_ps();
        let k = t / half + 1;
        let level = self.start_high ^ (k % 2 == 1);
        let edge = if level { Edge::Rising } else { Edge::Falling };
        (k * half, edge)
    }
}
