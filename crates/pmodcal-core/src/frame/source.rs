// crates/pmodcal-core/src/frame/source.rs

use std::io::Read;

/// Anything that hands out raw telemetry windows.
///
/// One call performs one blocking read of at most `n` bytes and may return
/// fewer. Zero bytes means end of stream; a serial port reports a quiet line
/// as `ErrorKind::TimedOut` instead.
pub trait ByteSource {
    fn read_window(&mut self, n: usize) -> std::io::Result<Vec<u8>>;
}

impl<R: Read> ByteSource for R {
    fn read_window(&mut self, n: usize) -> std::io::Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        let got = self.read(&mut buf)?;
        buf.truncate(got);
        Ok(buf)
    }
}
