use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::{Path, PathBuf};

/// psiguard-rs: last-resort memory pressure relief
///
/// psiguard-rs polls the kernel's memory pressure stall information
/// and, once the sustained stall percentage climbs above the configured
/// threshold, asks the kernel to run its OOM killer through the magic
/// sysrq interface, then backs off for a recovery interval so the
/// system can stabilize before observation resumes.
#[derive(Debug, Parser, Clone)]
#[command(about, long_about, version)]
pub struct Cli {
    /// Path to configuration file.
    ///
    /// If not provided, `/etc/psiguard/config.toml` and
    /// `/etc/psiguard/config.d/*.toml` are merged, with later files
    /// overriding earlier ones. If none exist, the built-in defaults
    /// are used.
    #[arg(short, long, value_parser = validate_file)]
    pub conffile: Option<PathBuf>,

    /// Pressure stall file to sample.
    ///
    /// Overriding this is only useful for exercising the daemon against
    /// a fabricated file.
    #[arg(long, default_value = monitor::MEMORY_PRESSURE_PATH)]
    pub pressure_file: PathBuf,

    /// Control file the OOM-kill command is written to.
    ///
    /// Overriding this is only useful for exercising the daemon against
    /// a scratch file.
    #[arg(long, default_value = monitor::SYSRQ_TRIGGER_PATH)]
    pub trigger_file: PathBuf,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

/// Check if the file exists.
#[inline(always)]
fn validate_file(file: &str) -> Result<PathBuf, String> {
    let path = Path::new(file);
    if path.exists() {
        Ok(path.to_owned())
    } else {
        Err(format!("File not found: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_paths_are_the_defaults() {
        let cli = Cli::parse_from(["psiguard-rs"]);
        assert_eq!(cli.pressure_file, PathBuf::from("/proc/pressure/memory"));
        assert_eq!(cli.trigger_file, PathBuf::from("/proc/sysrq-trigger"));
        assert!(cli.conffile.is_none());
    }

    #[test]
    fn missing_conffile_is_rejected() {
        let result = Cli::try_parse_from(["psiguard-rs", "--conffile", "/no/such/file.toml"]);
        assert!(result.is_err());
    }
}
