// crates/pmodcal-cli/src/lib.rs

pub mod io;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log to stderr; stdout carries frame and step lines.
/// Filter comes from `RUST_LOG`, default `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
