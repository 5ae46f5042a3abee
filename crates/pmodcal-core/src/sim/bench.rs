// crates/pmodcal-core/src/sim/bench.rs

use crate::channel::{Channel, CHANNEL_COUNT};
use crate::verify::harness::{ClockDomain, DeviceUnderTest, EdgeEvents};
use crate::sim::clock::{ClockGen, Edge};

/// Terminal overrides applied by the testbench.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pins {
    pub inputs: [Option<u16>; CHANNEL_COUNT],
    pub jacks: Option<u8>,
}

impl Pins {
    /// Value the design sees on an input terminal; undriven reads as 0.
    #[inline]
    pub fn input(&self, ch: Channel) -> u16 {
        self.inputs[ch.index()].unwrap_or(0)
    }

    /// Jack-detect register; undriven means nothing is plugged in.
    #[inline]
    pub fn jacks(&self) -> u8 {
        self.jacks.unwrap_or(0)
    }
}

/// A synchronous design clocked by `clk_fs` and `clk_256fs`.
pub trait ClockedModel {
    fn on_edge(&mut self, clk: ClockDomain, edge: Edge, pins: &Pins);

    fn output(&self, ch: Channel) -> u16;
}

/// Event-driven bench: owns a model and both clocks, and advances simulated
/// time one edge instant at a time. Coincident edges fire `clk_fs` first.
pub struct SimBench<M> {
    model: M,
    pins: Pins,
    clk_fs: ClockGen,
    clk_256fs: ClockGen,
    now_ps: u64,
    fs_rising: u64,
    fs256_rising: u64,
}

impl<M: ClockedModel> SimBench<M> {
    pub fn new(model: M) -> Self {
        Self::with_clocks(model, ClockGen::clk_fs(), ClockGen::clk_256fs())
    }

    pub fn with_clocks(model: M, clk_fs: ClockGen, clk_256fs: ClockGen) -> Self {
        Self {
            model,
            pins: Pins::default(),
            clk_fs,
            clk_256fs,
            now_ps: 0,
            fs_rising: 0,
            fs256_rising: 0,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn pins(&self) -> &Pins {
        &self.pins
    }

    pub fn now_ps(&self) -> u64 {
        self.now_ps
    }

    /// Rising edges seen so far on `clk`.
    pub fn rising_count(&self, clk: ClockDomain) -> u64 {
        match clk {
            ClockDomain::Fs => self.fs_rising,
            ClockDomain::Fs256 => self.fs256_rising,
        }
    }

    /// Advance to the next edge instant and fire every edge scheduled there.
    /// Returns true if `target` was among them.
    fn step(&mut self, target: (ClockDomain, Edge)) -> bool {
        let (t_fs, e_fs) = self.clk_fs.next_edge_after(self.now_ps);
        let (t_256, e_256) = self.clk_256fs.next_edge_after(self.now_ps);
        let t = t_fs.min(t_256);
        self.now_ps = t;

        let mut hit = false;
        if t_fs == t {
            hit |= self.fire(ClockDomain::Fs, e_fs, target);
        }
        if t_256 == t {
            hit |= self.fire(ClockDomain::Fs256, e_256, target);
        }
        hit
    }

    fn fire(&mut self, clk: ClockDomain, edge: Edge, target: (ClockDomain, Edge)) -> bool {
        if edge == Edge::Rising {
            match clk {
                ClockDomain::Fs => self.fs_rising += 1,
                ClockDomain::Fs256 => self.fs256_rising += 1,
            }
        }
        self.model.on_edge(clk, edge, &self.pins);
        (clk, edge) == target
    }

    fn wait_for(&mut self, clk: ClockDomain, edge: Edge) {
        while !self.step((clk, edge)) {}
    }
}

impl<M: ClockedModel> EdgeEvents for SimBench<M> {
    fn falling_edge(&mut self, clk: ClockDomain) {
        self.wait_for(clk, Edge::Falling);
    }

    fn rising_edge(&mut self, clk: ClockDomain) {
        self.wait_for(clk, Edge::Rising);
    }
}

impl<M: ClockedModel> DeviceUnderTest for SimBench<M> {
    fn force_jacks(&mut self, mask: u8) {
        self.pins.jacks = Some(mask);
    }

    fn release_jacks(&mut self) {
        self.pins.jacks = None;
    }

    fn force_input(&mut self, ch: Channel, raw: u16) {
        self.pins.inputs[ch.index()] = Some(raw);
    }

    fn release_input(&mut self, ch: Channel) {
        self.pins.inputs[ch.index()] = None;
    }

    fn read_output(&self, ch: Channel) -> u16 {
        self.model.output(ch)
    }
}
