#![forbid(unsafe_code)]

use crate::psi::PressureSample;
use config::Monitor;

/// What the loop should do with the sample it just took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    TriggerOom,
}

/// Trigger iff the sample is strictly above the threshold; equality
/// does not trigger. Stateless: one qualifying sample is enough, and
/// nothing is remembered between calls.
pub fn decide(sample: PressureSample, config: &Monitor) -> Action {
    if sample.avg10 > config.stall_threshold {
        Action::TriggerOom
    } else {
        Action::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn with_threshold(stall_threshold: f64) -> Monitor {
        Monitor {
            stall_threshold,
            ..Default::default()
        }
    }

    #[test]
    fn boundary_is_exclusive() {
        let config = with_threshold(5.0);
        assert_eq!(decide(PressureSample { avg10: 4.9 }, &config), Action::Continue);
        assert_eq!(decide(PressureSample { avg10: 5.0 }, &config), Action::Continue);
        assert_eq!(
            decide(PressureSample { avg10: 5.1 }, &config),
            Action::TriggerOom
        );
    }

    proptest! {
        #[test]
        fn never_triggers_at_or_below_threshold(
            threshold in 0.0f64..=100.0,
            delta in 0.0f64..=100.0,
        ) {
            let config = with_threshold(threshold);
            let at_or_below = PressureSample { avg10: (threshold - delta).max(0.0) };
            prop_assert_eq!(decide(at_or_below, &config), Action::Continue);
        }

        #[test]
        fn always_triggers_above_threshold(
            threshold in 0.0f64..=100.0,
            delta in 0.001f64..=100.0,
        ) {
            let config = with_threshold(threshold);
            let above = PressureSample { avg10: threshold + delta };
            prop_assert_eq!(decide(above, &config), Action::TriggerOom);
        }
    }
}
