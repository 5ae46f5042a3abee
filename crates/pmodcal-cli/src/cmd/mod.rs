// crates/pmodcal-cli/src/cmd/mod.rs

pub mod dump;
pub mod expect;
pub mod verify;
