// crates/pmodcal-core/src/verify/mod.rs

pub mod harness;
pub mod phase;
pub mod runner;
pub mod stimulus;
