pub mod error;

pub mod fixed;
pub mod channel;
pub mod frame;
pub mod cal;
pub mod verify;
pub mod sim;

pub use crate::cal::table::{CalEntry, CalTable};
pub use crate::channel::Channel;
pub use crate::error::{CalError, Result};
pub use crate::frame::decode::{decode_frame, Frame};
pub use crate::verify::runner::{Report, StepRecord, Verifier};
