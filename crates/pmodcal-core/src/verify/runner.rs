// crates/pmodcal-core/src/verify/runner.rs

use tracing::{debug, info, trace};

use crate::cal::table::CalTable;
use crate::cal::transfer;
use crate::channel::{Channel, CHANNEL_COUNT};
use crate::error::{CalError, Result};
use crate::fixed::twos;
use crate::verify::harness::{ClockDomain, DeviceUnderTest};
use crate::verify::phase::Phase;
use crate::verify::stimulus::{ALL_JACKS, DEFAULT_STIMULUS};

/// `clk_fs` rising edges waited after the first falling edge.
pub const SETTLE_RISING_EDGES: usize = 3;

/// Outcome of one (channel, stimulus) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepRecord {
    pub channel: Channel,
    pub stimulus: i16,
    pub expected: i16,
    pub actual: i16,
    /// The expected value was clamped to the output limit.
    pub saturated: bool,
}

impl StepRecord {
    #[inline]
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

/// A completed, fully matching verification run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    /// Fingerprint of the calibration table the run was checked against.
    pub fingerprint: String,
    /// Every step, channel-major then stimulus-minor.
    pub steps: Vec<StepRecord>,
}

impl Report {
    pub fn saturated_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.saturated).count()
    }
}

/// Drives stimulus through a calibration unit and checks every response.
pub struct Verifier {
    table: CalTable,
    stimuli: Vec<i16>,
    phase: Phase,
}

impl Verifier {
    pub fn new(table: CalTable, stimuli: Vec<i16>) -> Result<Self> {
        let mut v = Self {
            table,
            stimuli,
            phase: Phase::Init,
        };
        v.advance(Phase::LoadCalTable)?;
        if v.table.is_empty() {
            return Err(CalError::MalformedTable("table has no entries".into()));
        }
        if v.table.len() != CHANNEL_COUNT {
            return Err(CalError::MalformedTable(format!(
                "table covers {} channels, device has {}",
                v.table.len(),
                CHANNEL_COUNT
            )));
        }
        info!(
            entries = v.table.len(),
            fingerprint = %v.table.fingerprint_hex(),
            "calibration table loaded"
        );
        Ok(v)
    }

    pub fn with_default_stimuli(table: CalTable) -> Result<Self> {
        Self::new(table, DEFAULT_STIMULUS.to_vec())
    }

    /// Parse a calibration memory image and build a verifier over it. A
    /// malformed table fails here, before any terminal is touched.
    pub fn load(text: &str, stimuli: Vec<i16>) -> Result<Self> {
        let table = CalTable::parse(text, CHANNEL_COUNT)?;
        Self::new(table, stimuli)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn run<D: DeviceUnderTest>(&mut self, dut: &mut D) -> Result<Report> {
        self.run_with(dut, |_| {})
    }

    /// Run every (channel, stimulus) pair, calling `on_step` after each
    /// sample, including the one that fails. Stops at the first mismatch.
    pub fn run_with<D, F>(&mut self, dut: &mut D, mut on_step: F) -> Result<Report>
    where
        D: DeviceUnderTest,
        F: FnMut(&StepRecord),
    {
        self.phase = Phase::LoadCalTable;

        // Every jack reads as connected so the core does not zero its inputs.
        dut.force_jacks(ALL_JACKS);

        let mut steps = Vec::with_capacity(CHANNEL_COUNT * self.stimuli.len());
        for ch in Channel::ALL {
            let entry = self.table.entry(ch)?;
            for i in 0..self.stimuli.len() {
                let stimulus = self.stimuli[i];
                let t = transfer::transfer(entry, stimulus);

                self.advance(Phase::Drive)?;
                dut.force_input(ch, twos::encode(stimulus));

                self.advance(Phase::Settle)?;
                dut.falling_edge(ClockDomain::Fs);
                dut.rising_edges(ClockDomain::Fs, SETTLE_RISING_EDGES);

                self.advance(Phase::Sample)?;
                let actual = twos::decode(dut.read_output(ch));

                self.advance(Phase::Release)?;
                dut.release_input(ch);

                let rec = StepRecord {
                    channel: ch,
                    stimulus,
                    expected: t.expected,
                    actual,
                    saturated: t.saturated,
                };
                debug!(
                    ch = ch.id(),
                    stimulus,
                    expected = rec.expected,
                    actual,
                    saturated = rec.saturated,
                    "sample"
                );
                on_step(&rec);

                if !rec.passed() {
                    dut.release_jacks();
                    return Err(CalError::VerificationMismatch {
                        channel: ch.id(),
                        stimulus,
                        expected: rec.expected,
                        actual,
                    });
                }
                steps.push(rec);
            }
        }

        dut.release_jacks();
        self.advance(Phase::Done)?;
        info!(steps = steps.len(), "verification passed");

        Ok(Report {
            fingerprint: self.table.fingerprint_hex(),
            steps,
        })
    }

    fn advance(&mut self, next: Phase) -> Result<()> {
        if !self.phase.can_advance_to(next) {
            return Err(CalError::Validation(format!(
                "illegal verifier transition {:?} -> {:?}",
                self.phase, next
            )));
        }
        trace!(from = ?self.phase, to = ?next, "phase");
        self.phase = next;
        Ok(())
    }
}
