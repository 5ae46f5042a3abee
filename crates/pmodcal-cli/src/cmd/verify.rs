// crates/pmodcal-cli/src/cmd/verify.rs

use clap::{Args, ValueEnum};
use pmodcal_cli::io::cal_file;
use pmodcal_core::sim::{CalUnitModel, ModelFault, SimBench};
use pmodcal_core::verify::stimulus::DEFAULT_STIMULUS;
use pmodcal_core::{Channel, Verifier};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Fault {
    /// Saturate at +/-32767 instead of +/-32000
    FullScaleClamp,
    /// Hold --fault-channel's output at zero
    StuckOutput,
    /// Delay outputs by --fault-cycles extra sample periods
    ExtraLatency,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Calibration memory image (.hex)
    #[arg(long, default_value = "configs/cal_mem.hex")]
    pub cal: String,

    /// Stimulus values (comma separated); defaults to 23173,-14928,32000,-32000
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub stimulus: Vec<i16>,

    /// Inject a defect into the model to check the verifier catches it
    #[arg(long, value_enum)]
    pub fault: Option<Fault>,

    #[arg(long, default_value_t = 0)]
    pub fault_channel: u8,

    #[arg(long, default_value_t = 2)]
    pub fault_cycles: usize,
}

pub fn run(args: VerifyArgs) -> anyhow::Result<()> {
    let table = cal_file::load_table(&args.cal)?;
    println!("calibration constants: {:?}", table.flat_values());

    let stimuli = if args.stimulus.is_empty() {
        DEFAULT_STIMULUS.to_vec()
    } else {
        args.stimulus
    };

    let mut model = CalUnitModel::new(&table)?;
    if let Some(f) = args.fault {
        model = model.with_fault(match f {
            Fault::FullScaleClamp => ModelFault::FullScaleClamp,
            Fault::StuckOutput => ModelFault::StuckOutput(Channel::new(args.fault_channel)?, 0),
            Fault::ExtraLatency => ModelFault::ExtraLatency(args.fault_cycles),
        });
    }
    let mut dut = SimBench::new(model);

    let mut verifier = Verifier::new(table, stimuli)?;
    let report = verifier.run_with(&mut dut, |s| {
        println!(
            "ch={}\t{:6}\t=>\t{:6}\t(expect={})",
            s.channel.id(),
            s.stimulus,
            s.actual,
            s.expected
        );
    })?;

    println!(
        "ok verify: steps={} saturated={} table={}",
        report.steps.len(),
        report.saturated_steps(),
        report.fingerprint
    );
    Ok(())
}
