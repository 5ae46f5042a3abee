// crates/pmodcal-cli/src/cmd/dump.rs

use clap::Args;
use pmodcal_cli::io::dump::{self, DumpOptions};
use pmodcal_cli::io::serial::{
    self, SerialConfig, DEFAULT_BAUD, DEFAULT_TIMEOUT_MS, DEFAULT_WINDOW,
    MIN_WINDOW,
};
use pmodcal_core::channel::CHANNEL_COUNT;
use tracing::info;

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Serial device of the FPGA board, e.g. /dev/ttyUSB1
    pub device: String,

    #[arg(long, default_value_t = DEFAULT_BAUD)]
    pub baud: u32,

    /// Bytes per read window (at least 20)
    #[arg(long, default_value_t = DEFAULT_WINDOW, value_parser = parse_window)]
    pub window: usize,

    /// Read timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Stop after this many decoded frames (default: run until interrupted)
    #[arg(long)]
    pub frames: Option<u64>,
}

fn parse_window(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    if n < MIN_WINDOW {
        return Err(format!("window must be at least {MIN_WINDOW} bytes"));
    }
    Ok(n)
}

pub fn run(args: DumpArgs) -> anyhow::Result<()> {
    let cfg = SerialConfig {
        path: args.device,
        baud: args.baud,
        window: args.window,
        timeout_ms: args.timeout_ms,
    };
    let opts = DumpOptions {
        window: cfg.window,
        channels: CHANNEL_COUNT,
        max_frames: args.frames,
    };

    let stats = serial::acquire(&cfg, |src| {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        dump::run_loop(src, &mut out, &opts)
    })?;

    info!(
        windows = stats.windows,
        frames = stats.frames,
        framing_errors = stats.framing_errors,
        underruns = stats.underruns,
        "dump finished"
    );
    Ok(())
}
