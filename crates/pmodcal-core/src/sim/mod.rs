// crates/pmodcal-core/src/sim/mod.rs

pub mod bench;
pub mod cal_unit;
pub mod clock;

pub use bench::{Pins, SimBench};
pub use cal_unit::{CalUnitModel, ModelFault};
pub use clock::{ClockGen, Edge};
