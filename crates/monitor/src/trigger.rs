#![forbid(unsafe_code)]

use crate::error::Error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Magic-sysrq control file; writes require `CAP_SYS_ADMIN`.
pub const SYSRQ_TRIGGER_PATH: &str = "/proc/sysrq-trigger";

/// The `f` sysrq command asks the kernel to run the OOM killer
/// immediately, exactly as if allocation had failed.
const OOM_KILL_COMMAND: &[u8] = b"f";

/// Requests a kernel-level OOM kill. Production implementation is
/// [`SysrqTrigger`]; tests substitute fakes.
pub trait KillTrigger {
    fn invoke(&mut self) -> Result<(), Error>;
}

/// Writes the OOM-kill command to the sysrq control file.
///
/// This write is the daemon's entire purpose, so nothing is retried or
/// swallowed here: a daemon that cannot deliver the kill request while
/// appearing healthy is worse than one that is visibly down.
#[derive(Debug)]
pub struct SysrqTrigger {
    path: PathBuf,
}

impl SysrqTrigger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn sysrq() -> Self {
        Self::new(SYSRQ_TRIGGER_PATH)
    }
}

impl KillTrigger for SysrqTrigger {
    fn invoke(&mut self) -> Result<(), Error> {
        let mut file = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(|source| Error::Open {
                path: self.path.clone(),
                source,
            })?;

        // One command, one write call. The kernel consumes the whole
        // command or nothing, so a short write is a failure.
        let written = file.write(OOM_KILL_COMMAND).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })?;
        if written != OOM_KILL_COMMAND.len() {
            return Err(Error::Write {
                path: self.path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::WriteZero, "short write"),
            });
        }
        Ok(())
    }
}
