// crates/pmodcal-cli/src/io/dump.rs

use std::io::{ErrorKind, Write};

use anyhow::{bail, Result};
use pmodcal_core::channel::CHANNEL_COUNT;
use pmodcal_core::frame::source::ByteSource;
use pmodcal_core::frame::sync::frame_end;
use pmodcal_core::{decode_frame, CalError, Frame};
use tracing::{debug, info, warn};

use crate::io::serial::DEFAULT_WINDOW;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DumpOptions {
    /// Bytes requested per read.
    pub window: usize,
    /// Samples per frame (4 in + 4 out).
    pub channels: usize,
    /// Stop after this many decoded frames; `None` polls forever.
    pub max_frames: Option<u64>,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            channels: CHANNEL_COUNT,
            max_frames: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DumpStats {
    pub windows: u64,
    pub frames: u64,
    pub framing_errors: u64,
    pub underruns: u64,
}

/// One output line: `n I0 0x5a85 (23173) I1 ...`.
pub fn format_frame_line(n: u64, frame: &Frame) -> String {
    let mut s = format!("{n}");
    for (ch, v) in frame.labelled() {
        s.push_str(&format!(" {} {:#x} ({})", ch.label(), v as u16, v));
    }
    s
}

/// Poll `src` one window at a time and print one line per decoded frame.
///
/// The line number is the read-cycle counter, so skipped windows leave gaps.
/// Missing marker and short windows are logged and skipped. A read timeout
/// skips the window; a zero-length read is end of stream.
pub fn run_loop<S, W>(src: &mut S, out: &mut W, opts: &DumpOptions) -> Result<DumpStats>
where
    S: ByteSource,
    W: Write,
{
    let need = frame_end(0, opts.channels);
    if opts.window < need {
        bail!("window of {} bytes cannot hold a {need}-byte frame", opts.window);
    }

    let mut st = DumpStats::default();

    while opts.max_frames.map_or(true, |m| st.frames < m) {
        let raw = match src.read_window(opts.window) {
            Ok(raw) if raw.is_empty() => {
                info!(windows = st.windows, "end of stream");
                break;
            }
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::TimedOut => {
                debug!(window = st.windows, "read timed out");
                st.windows += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let n = st.windows;
        st.windows += 1;

        match decode_frame(&raw, opts.channels) {
            Ok(frame) => {
                writeln!(out, "{}", format_frame_line(n, &frame))?;
                st.frames += 1;
            }
            Err(e @ CalError::Framing { .. }) => {
                st.framing_errors += 1;
                warn!(window = n, "{e}");
            }
            Err(e @ CalError::BufferUnderrun { .. }) => {
                st.underruns += 1;
                warn!(window = n, "{e}");
            }
            Err(e) => return Err(e.into()),
        }
    }

    out.flush()?;
    Ok(st)
}
