use clap::Parser;
use config::Config;
use monitor::{Engine, PsiReader, Services, SysrqTrigger, ThreadSleeper};
use psiguard_rs::{cli::Cli, signals};
use tracing::{debug, info, trace};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // NOTE: The verbosity flag takes precedence over the environment
    // variable for log control. `PSIGUARD_LOG` can set the log level
    // per crate but cannot lower the level chosen by the flags.
    let env_filter = EnvFilter::builder()
        .with_env_var("PSIGUARD_LOG")
        .from_env()?
        .add_directive(cli.verbosity.log_level_filter().as_str().parse()?);

    // Startup and trigger notifications go to stdout; stderr stays
    // reserved for the fatal diagnostic printed on exit.
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter)
        .init();

    // load config
    let config = match &cli.conffile {
        Some(path) => Config::load(path)?,
        _ => {
            let mut candidates = glob::glob("/etc/psiguard/config.d/*.toml")?
                .filter_map(Result::ok)
                .collect::<Vec<_>>();
            candidates.insert(0, "/etc/psiguard/config.toml".into());
            trace!(?candidates, "config file candidates");
            Config::load_multiple(candidates)?
        }
    };
    debug!(?config, ?cli);

    signals::install()?;

    let monitor_config = config.monitor;
    info!(
        poll_interval = monitor_config.poll_interval,
        recovery_interval = monitor_config.recovery_interval,
        stall_threshold = monitor_config.stall_threshold,
        "watching memory pressure"
    );

    let mut engine = Engine::new(
        monitor_config,
        Services {
            source: Box::new(PsiReader::new(&cli.pressure_file)),
            trigger: Box::new(SysrqTrigger::new(&cli.trigger_file)),
            sleeper: Box::new(ThreadSleeper),
        },
    );

    // Any engine error is fatal: it bubbles up here, gets printed with
    // its path and OS error detail, and the process exits non-zero for
    // the supervisor to restart.
    engine.run(signals::shutdown_requested)?;

    info!("termination signal received, exiting");
    Ok(())
}
