use thiserror::Error;

pub type Result<T> = std::result::Result<T, CalError>;

#[derive(Debug, Error)]
pub enum CalError {
    #[error("framing error: sync marker 0xBEEF not found in {window}-byte window")]
    Framing { window: usize },

    #[error("buffer underrun: need {need} bytes after window start, got {got}")]
    BufferUnderrun { need: usize, got: usize },

    #[error("malformed calibration table: {0}")]
    MalformedTable(String),

    #[error(
        "verification mismatch: ch={channel} stimulus={stimulus} expected={expected} actual={actual}"
    )]
    VerificationMismatch {
        channel: u8,
        stimulus: i16,
        expected: i16,
        actual: i16,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
