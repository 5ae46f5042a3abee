// crates/pmodcal-core/src/sim/cal_unit.rs

use std::collections::VecDeque;

use crate::cal::table::{CalEntry, CalTable};
use crate::channel::{Channel, CHANNEL_COUNT};
use crate::error::{CalError, Result};
use crate::fixed::twos;
use crate::sim::bench::{ClockedModel, Pins};
use crate::sim::clock::Edge;
use crate::verify::harness::ClockDomain;

/// Deliberate defects for exercising the verifier's failure path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelFault {
    /// Saturate at full-scale i16 instead of +/-32000.
    FullScaleClamp,
    /// One output terminal is stuck at a fixed word.
    StuckOutput(Channel, u16),
    /// Extra `clk_fs` periods between latch and publish.
    ExtraLatency(usize),
}

/// Behavioral model of the calibration core.
///
/// Pipeline, per `clk_fs` period:
/// 1. `clk_fs` rising: publish last period's results, latch all inputs
///    (jack bit clear or undriven input latches 0).
/// 2. each `clk_256fs` rising: calibrate one latched channel, 0..=7.
///
/// A forced input therefore reaches its output terminal on the second
/// `clk_fs` rising edge after it is forced.
pub struct CalUnitModel {
    entries: [CalEntry; CHANNEL_COUNT],
    fault: Option<ModelFault>,
    latched: [i16; CHANNEL_COUNT],
    results: [i16; CHANNEL_COUNT],
    cursor: usize,
    in_flight: VecDeque<[i16; CHANNEL_COUNT]>,
    outputs: [u16; CHANNEL_COUNT],
}

impl CalUnitModel {
    pub fn new(table: &CalTable) -> Result<Self> {
        let entries: [CalEntry; CHANNEL_COUNT] =
            table.entries().try_into().map_err(|_| {
                CalError::MalformedTable(format!(
                    "cal unit needs {} entries, table has {}",
                    CHANNEL_COUNT,
                    table.len()
                ))
            })?;
        Ok(Self {
            entries,
            fault: None,
            latched: [0; CHANNEL_COUNT],
            results: [0; CHANNEL_COUNT],
            cursor: CHANNEL_COUNT,
            in_flight: VecDeque::new(),
            outputs: [0; CHANNEL_COUNT],
        })
    }

    pub fn with_fault(mut self, fault: ModelFault) -> Self {
        self.fault = Some(fault);
        self
    }

    fn limit(&self) -> i64 {
        match self.fault {
            Some(ModelFault::FullScaleClamp) => i16::MAX as i64,
            _ => 32000,
        }
    }

    fn extra_latency(&self) -> usize {
        match self.fault {
            Some(ModelFault::ExtraLatency(n)) => n,
            _ => 0,
        }
    }

    // 17-bit difference, 33-bit product, arithmetic shift, saturate.
    fn calibrate(&self, x: i16, e: CalEntry) -> i16 {
        let diff = x as i32 - e.offset as i32;
        let prod = diff as i64 * e.gain as i64;
        let lim = self.limit();
        (prod >> 10).clamp(-lim, lim) as i16
    }

    fn publish(&mut self) {
        self.in_flight.push_back(self.results);
        while self.in_flight.len() > self.extra_latency() {
            if let Some(r) = self.in_flight.pop_front() {
                for (o, v) in self.outputs.iter_mut().zip(r) {
                    *o = twos::encode(v);
                }
            }
        }
    }

    fn latch(&mut self, pins: &Pins) {
        let jacks = pins.jacks();
        for ch in Channel::ALL {
            self.latched[ch.index()] = if jacks & ch.jack_bit() != 0 {
                twos::decode(pins.input(ch))
            } else {
                0
            };
        }
        self.cursor = 0;
    }
}

impl ClockedModel for CalUnitModel {
    fn on_edge(&mut self, clk: ClockDomain, edge: Edge, pins: &Pins) {
        if edge != Edge::Rising {
            return;
        }
        match clk {
            ClockDomain::Fs => {
                self.publish();
                self.latch(pins);
            }
            ClockDomain::Fs256 => {
                if self.cursor < CHANNEL_COUNT {
                    let i = self.cursor;
                    self.results[i] = self.calibrate(self.latched[i], self.entries[i]);
                    self.cursor += 1;
                }
            }
        }
    }

    fn output(&self, ch: Channel) -> u16 {
        if let Some(ModelFault::StuckOutput(stuck, word)) = self.fault {
            if stuck == ch {
                return word;
            }
        }
        self.outputs[ch.index()]
    }
}
