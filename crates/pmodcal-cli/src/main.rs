// crates/pmodcal-cli/src/main.rs

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "pmodcal")]
#[command(about = "Calibration core debug tools: telemetry dump and fixed-point verification", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode the FPGA's in/out telemetry from a serial port
    Dump(cmd::dump::DumpArgs),

    /// Drive stimulus through the cal unit model and check every output
    Verify(cmd::verify::VerifyArgs),

    /// Print expected calibrated outputs for a table (no device)
    Expect(cmd::expect::ExpectArgs),
}

fn main() -> anyhow::Result<()> {
    pmodcal_cli::init_logging();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Dump(args) => cmd::dump::run(args),
        Commands::Verify(args) => cmd::verify::run(args),
        Commands::Expect(args) => cmd::expect::run(args),
    }
}
