// crates/pmodcal-core/src/frame/mod.rs

pub mod decode;
pub mod source;
pub mod sync;
