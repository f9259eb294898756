#![forbid(unsafe_code)]

use crate::error::{Error, ParseReason};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::PathBuf;

/// System-wide memory pressure file, present since Linux 4.20 when the
/// kernel is built with `CONFIG_PSI`.
pub const MEMORY_PRESSURE_PATH: &str = "/proc/pressure/memory";

/// A PSI snapshot is two short lines; the bound exists so a
/// misconfigured path cannot make the reader slurp an arbitrary file.
const READ_BUF_SIZE: usize = 4096;

/// The `full avg10` stall percentage from a single read of the
/// pressure file. No history is kept; each cycle reads fresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSample {
    pub avg10: f64,
}

/// Source of pressure samples. The production implementation is
/// [`PsiReader`]; tests substitute fakes.
pub trait SampleSource {
    fn sample(&mut self) -> Result<PressureSample, Error>;
}

/// Reads and parses the kernel memory pressure file.
///
/// The file has the form:
///
/// ```text
/// some avg10=0.00 avg60=0.00 avg300=0.00 total=0
/// full avg10=0.00 avg60=0.00 avg300=0.00 total=0
/// ```
///
/// Only the `avg10` field of the `full` record is consumed. Every
/// failure mode propagates to the caller; a daemon that cannot observe
/// pressure must not keep running as if it could.
#[derive(Debug)]
pub struct PsiReader {
    path: PathBuf,
}

impl PsiReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn memory() -> Self {
        Self::new(MEMORY_PRESSURE_PATH)
    }

    /// Read the whole snapshot. Kernel pseudo-files usually return
    /// everything in one read, but that is convention, not contract, so
    /// keep reading until EOF or the buffer is exhausted.
    fn read_raw(&self) -> Result<Vec<u8>, Error> {
        let mut file = File::open(&self.path).map_err(|source| Error::Open {
            path: self.path.clone(),
            source,
        })?;

        let mut buf = vec![0u8; READ_BUF_SIZE];
        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(Error::Read {
                        path: self.path.clone(),
                        source,
                    });
                }
            }
        }
        buf.truncate(filled);
        Ok(buf)
    }

    fn parse_error(&self, reason: ParseReason) -> Error {
        Error::Parse {
            path: self.path.clone(),
            reason,
        }
    }
}

impl SampleSource for PsiReader {
    fn sample(&mut self) -> Result<PressureSample, Error> {
        let raw = self.read_raw()?;
        let text =
            std::str::from_utf8(&raw).map_err(|_| self.parse_error(ParseReason::NotUtf8))?;
        let avg10 = parse_full_avg10(text).map_err(|reason| self.parse_error(reason))?;
        Ok(PressureSample { avg10 })
    }
}

/// Locate the `full` record, then its `avg10=` field, and parse the
/// value. Malformed or out-of-range values are errors, never clamped.
pub fn parse_full_avg10(text: &str) -> Result<f64, ParseReason> {
    let record = text
        .lines()
        .find(|line| line.split_whitespace().next() == Some("full"))
        .ok_or(ParseReason::MissingFullRecord)?;

    let field = record
        .split_whitespace()
        .find_map(|token| token.strip_prefix("avg10="))
        .ok_or(ParseReason::MissingAvg10)?;

    let value: f64 = field.parse().map_err(|_| ParseReason::InvalidNumber)?;
    if !value.is_finite() || value < 0.0 {
        return Err(ParseReason::OutOfRange);
    }
    Ok(value)
}
