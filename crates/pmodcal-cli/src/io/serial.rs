// crates/pmodcal-cli/src/io/serial.rs

use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result};
use serialport::SerialPort;
use tracing::{debug, info};

/// Debug UART rate of the FPGA board.
pub const DEFAULT_BAUD: u32 = 1_000_000;

/// Bytes requested per read; holds several 18-byte frames.
pub const DEFAULT_WINDOW: usize = 100;

/// Smallest window that still holds the marker and all eight samples.
pub const MIN_WINDOW: usize = 20;

pub const DEFAULT_TIMEOUT_MS: u64 = 500;

/// Everything needed to open the telemetry port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerialConfig {
    pub path: String,
    pub baud: u32,
    pub window: usize,
    pub timeout_ms: u64,
}

impl SerialConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud: DEFAULT_BAUD,
            window: DEFAULT_WINDOW,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// An open telemetry port. Closed when dropped.
pub struct SerialSource {
    port: Box<dyn SerialPort>,
    path: String,
}

impl SerialSource {
    pub fn open(cfg: &SerialConfig) -> Result<Self> {
        let port = serialport::new(&cfg.path, cfg.baud)
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .open()
            .with_context(|| format!("open serial port {} at {} baud", cfg.path, cfg.baud))?;
        info!(path = %cfg.path, baud = cfg.baud, "serial port opened");
        Ok(Self {
            port,
            path: cfg.path.clone(),
        })
    }
}

impl Read for SerialSource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.port.read(buf)
    }
}

impl Drop for SerialSource {
    fn drop(&mut self) {
        debug!(path = %self.path, "serial port closed");
    }
}

/// Open the port, hand it to `f`, and close it on every exit path.
pub fn acquire<T, F>(cfg: &SerialConfig, f: F) -> Result<T>
where
    F: FnOnce(&mut SerialSource) -> Result<T>,
{
    let mut src = SerialSource::open(cfg)?;
    f(&mut src)
}
