// crates/pmodcal-cli/src/io/mod.rs

pub mod cal_file;
pub mod dump;
pub mod serial;
