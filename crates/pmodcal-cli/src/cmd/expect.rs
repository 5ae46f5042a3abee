// crates/pmodcal-cli/src/cmd/expect.rs

use clap::Args;
use pmodcal_cli::io::cal_file;
use pmodcal_core::cal::transfer::transfer;
use pmodcal_core::verify::stimulus::DEFAULT_STIMULUS;
use pmodcal_core::Channel;

#[derive(Args, Debug)]
pub struct ExpectArgs {
    /// Calibration memory image (.hex)
    #[arg(long, default_value = "configs/cal_mem.hex")]
    pub cal: String,

    /// Stimulus values (comma separated); defaults to the verification set
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub stimulus: Vec<i16>,
}

pub fn run(args: ExpectArgs) -> anyhow::Result<()> {
    let table = cal_file::load_table(&args.cal)?;
    let stimuli = if args.stimulus.is_empty() {
        DEFAULT_STIMULUS.to_vec()
    } else {
        args.stimulus
    };

    let mut header = String::from("ch\toffset\tgain");
    for s in &stimuli {
        header.push_str(&format!("\t{s:>6}"));
    }
    println!("{header}");

    for ch in Channel::ALL {
        let e = table.entry(ch)?;
        let mut row = format!("{}\t{}\t{}", ch.label(), e.offset, e.gain);
        for &s in &stimuli {
            let t = transfer(e, s);
            // '*' marks a clamped value
            let mark = if t.saturated { "*" } else { "" };
            row.push_str(&format!("\t{:>6}{}", t.expected, mark));
        }
        println!("{row}");
    }

    eprintln!("table = {} ({})", args.cal, table.fingerprint_hex());
    Ok(())
}
