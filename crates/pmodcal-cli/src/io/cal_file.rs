// crates/pmodcal-cli/src/io/cal_file.rs

use anyhow::{Context, Result};
use pmodcal_core::channel::CHANNEL_COUNT;
use pmodcal_core::CalTable;

/// Load a calibration memory image (.hex) for the 8-channel device.
pub fn load_table(path: &str) -> Result<CalTable> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read cal table {path}"))?;
    let table =
        CalTable::parse(&text, CHANNEL_COUNT).with_context(|| format!("parse cal table {path}"))?;
    Ok(table)
}

/// Write a table in the same format `load_table` reads.
pub fn save_table(path: &str, table: &CalTable) -> Result<()> {
    std::fs::write(path, table.to_hex_text()).with_context(|| format!("write cal table {path}"))?;
    Ok(())
}
