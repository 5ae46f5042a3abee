// crates/pmodcal-core/src/cal/mod.rs

pub mod table;
pub mod transfer;
