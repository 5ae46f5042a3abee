use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;

use pmodcal_cli::io::dump::{self, DumpOptions};
use pmodcal_cli::io::serial::{self, SerialConfig};

const USAGE: &str = "Usage: dump-serial /dev/ttyX (serial port of FPGA board)";

#[derive(Parser, Debug)]
#[command(name = "dump-serial")]
struct Args {
    device: String,
}

fn main() -> Result<()> {
    let a = match Args::try_parse() {
        Ok(a) => a,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            println!("{USAGE}");
            std::process::exit(1);
        }
    };
    pmodcal_cli::init_logging();

    let cfg = SerialConfig::new(a.device);
    let opts = DumpOptions {
        window: cfg.window,
        ..DumpOptions::default()
    };

    serial::acquire(&cfg, |src| {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        dump::run_loop(src, &mut out, &opts)
    })?;

    Ok(())
}
