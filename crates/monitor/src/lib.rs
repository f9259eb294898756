#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod policy;
pub mod psi;
pub mod trigger;

pub use engine::{Engine, Services, Sleeper, ThreadSleeper, Tick};
pub use error::{Error, ParseReason};
pub use policy::{Action, decide};
pub use psi::{MEMORY_PRESSURE_PATH, PressureSample, PsiReader, SampleSource, parse_full_avg10};
pub use trigger::{KillTrigger, SYSRQ_TRIGGER_PATH, SysrqTrigger};
