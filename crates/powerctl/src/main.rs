//! Legacy power-command shim.
//!
//! Installed as symlinks named `reboot`, `poweroff`, `shutdown`, and
//! `halt`; the invoked name selects the service-manager action. The
//! historic sysvinit flags are accepted for compatibility and ignored,
//! since the service manager handles wtmp records and wall messages
//! itself.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::Parser;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Command, ExitCode};

const USAGE: &str = "usage: reboot|poweroff|shutdown|halt [-n] [-f] [-w] [-d] [--no-wall]";

#[derive(Debug, Parser)]
#[command(about = "Translate a legacy power command into a service-manager action")]
struct Cli {
    /// Print the command that would be executed instead of running it.
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Ignored, accepted for sysvinit compatibility.
    #[arg(short, long)]
    force: bool,

    /// Ignored, accepted for sysvinit compatibility.
    #[arg(short, long)]
    wtmp_only: bool,

    /// Ignored, accepted for sysvinit compatibility.
    #[arg(short = 'd', long)]
    no_record: bool,

    /// Ignored, accepted for sysvinit compatibility.
    #[arg(long)]
    no_wall: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PowerAction {
    Reboot,
    Poweroff,
    Halt,
}

impl PowerAction {
    fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "reboot" => Some(Self::Reboot),
            // Bare `shutdown` has meant poweroff for a long time.
            "poweroff" | "shutdown" => Some(Self::Poweroff),
            "halt" => Some(Self::Halt),
            _ => None,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Reboot => "reboot",
            Self::Poweroff => "poweroff",
            Self::Halt => "halt",
        }
    }
}

/// The service-manager invocation for an action: the verb plus `-i` to
/// bypass inhibitor locks, which is what the legacy commands did.
fn plan(action: PowerAction) -> [&'static str; 3] {
    ["systemctl", action.verb(), "-i"]
}

fn main() -> ExitCode {
    let mut args = std::env::args_os();
    let argv0 = args.next().unwrap_or_default();
    let alias = Path::new(&argv0)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_owned();

    let Some(action) = PowerAction::from_alias(&alias) else {
        eprintln!("{alias}: unrecognized power command alias");
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let cli = Cli::parse_from(std::iter::once(argv0).chain(args));

    let argv = plan(action);
    if cli.dry_run {
        println!("{}", argv.join(" "));
        return ExitCode::SUCCESS;
    }

    // exec only returns on failure.
    let err = Command::new(argv[0]).args(&argv[1..]).exec();
    eprintln!("{alias}: failed to execute {}: {err}", argv[0]);
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_their_actions() {
        assert_eq!(PowerAction::from_alias("reboot"), Some(PowerAction::Reboot));
        assert_eq!(
            PowerAction::from_alias("poweroff"),
            Some(PowerAction::Poweroff)
        );
        assert_eq!(
            PowerAction::from_alias("shutdown"),
            Some(PowerAction::Poweroff)
        );
        assert_eq!(PowerAction::from_alias("halt"), Some(PowerAction::Halt));
    }

    #[test]
    fn unknown_aliases_are_rejected() {
        assert_eq!(PowerAction::from_alias("restart"), None);
        assert_eq!(PowerAction::from_alias(""), None);
    }

    #[test]
    fn plan_uses_the_inhibitor_flag() {
        assert_eq!(plan(PowerAction::Reboot), ["systemctl", "reboot", "-i"]);
        assert_eq!(plan(PowerAction::Poweroff), ["systemctl", "poweroff", "-i"]);
        assert_eq!(plan(PowerAction::Halt), ["systemctl", "halt", "-i"]);
    }

    #[test]
    fn compat_flags_are_accepted() {
        let cli = Cli::parse_from(["halt", "-f", "-w", "-d", "--no-wall"]);
        assert!(!cli.dry_run);
        assert!(cli.force);
        assert!(cli.wtmp_only);
        assert!(cli.no_record);
        assert!(cli.no_wall);
    }

    #[test]
    fn dry_run_flag_parses() {
        let cli = Cli::parse_from(["reboot", "-n"]);
        assert!(cli.dry_run);
    }

    #[test]
    fn unknown_options_are_errors() {
        assert!(Cli::try_parse_from(["halt", "--frobnicate"]).is_err());
        assert!(Cli::try_parse_from(["halt", "-x"]).is_err());
    }
}
