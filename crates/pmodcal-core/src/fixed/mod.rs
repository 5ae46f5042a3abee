// crates/pmodcal-core/src/fixed/mod.rs

pub mod twos;
