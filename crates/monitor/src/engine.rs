#![forbid(unsafe_code)]

use crate::error::Error;
use crate::policy::{self, Action};
use crate::psi::{PressureSample, SampleSource};
use crate::trigger::KillTrigger;
use config::Monitor;
use std::time::Duration;
use tracing::{debug, warn};

/// Sleep seam so tests can record intervals instead of waiting them
/// out. The production implementation blocks the one daemon thread.
pub trait Sleeper {
    fn sleep(&mut self, period: Duration);
}

#[derive(Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, period: Duration) {
        std::thread::sleep(period);
    }
}

/// The engine's collaborators, boxed so tests can swap in fakes.
pub struct Services {
    pub source: Box<dyn SampleSource + Send>,
    pub trigger: Box<dyn KillTrigger + Send>,
    pub sleeper: Box<dyn Sleeper + Send>,
}

/// What one cycle did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub sample: PressureSample,
    pub action: Action,
    pub slept: Duration,
}

/// The polling loop: sample, decide, trigger if necessary, sleep.
///
/// Errors from the sample source and the trigger propagate out of
/// [`Engine::tick`] untouched. The engine never terminates the process
/// itself; the caller owns the log-and-exit policy.
pub struct Engine {
    config: Monitor,
    services: Services,
}

impl Engine {
    pub fn new(config: Monitor, services: Services) -> Self {
        Self { config, services }
    }

    /// One full cycle. After a trigger the recovery interval is slept
    /// instead of the poll interval, so the system gets a window to
    /// stabilize before it is observed again.
    pub fn tick(&mut self) -> Result<Tick, Error> {
        let sample = self.services.source.sample()?;
        let action = policy::decide(sample, &self.config);

        let slept = match action {
            Action::Continue => {
                debug!(avg10 = sample.avg10, "memory pressure below threshold");
                let period = self.config.poll_interval();
                self.services.sleeper.sleep(period);
                period
            }
            Action::TriggerOom => {
                warn!(
                    avg10 = sample.avg10,
                    threshold = self.config.stall_threshold,
                    "memory stall threshold exceeded, requesting kernel OOM kill"
                );
                self.services.trigger.invoke()?;
                let period = self.config.recovery_interval();
                self.services.sleeper.sleep(period);
                period
            }
        };

        Ok(Tick {
            sample,
            action,
            slept,
        })
    }

    /// Run until `stop` reports true between iterations or a cycle
    /// fails. There is no other exit: the daemon is meant to outlive
    /// everything except its supervisor.
    pub fn run(&mut self, stop: impl Fn() -> bool) -> Result<(), Error> {
        while !stop() {
            self.tick()?;
        }
        Ok(())
    }
}
