//! Timeline: explicit stage machine for the toast lifetime
//!
//! Created → FadingIn → Visible → FadingOut → Terminated
//!
//! Each completed stage yields the next `Step` for the run loop to perform.

use std::time::Duration;

use crate::animation::{Easing, Fade};

/// Stage durations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineConfig {
    pub fade_in_ms: u32,
    pub hold_ms: u32,
    pub fade_out_ms: u32,
    pub fade_in_easing: Easing,
    pub fade_out_easing: Easing,
}

impl TimelineConfig {
    /// Upper bound on the toast lifetime
    pub fn total(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms as u64 + self.hold_ms as u64 + self.fade_out_ms as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    FadingIn,
    Visible,
    FadingOut,
    Terminated,
}

/// Work the run loop performs for the current phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Animate opacity, then call `complete`
    Fade(Fade),
    /// Schedule a one-shot deadline, call `complete` when it fires
    Wait(Duration),
    /// Tear down and exit
    Exit,
}

#[derive(Debug, Clone)]
pub struct Timeline {
    phase: Phase,
    config: TimelineConfig,
}

impl Timeline {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            phase: Phase::Created,
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Created → FadingIn
    /// Calling again after start is the same as `complete`
    pub fn start(&mut self) -> Step {
        match self.phase {
            Phase::Created => {
                self.phase = Phase::FadingIn;
                self.step()
            }
            _ => self.complete(),
        }
    }

    /// Finish the current stage and enter the next one
    pub fn complete(&mut self) -> Step {
        self.phase = match self.phase {
            Phase::Created => Phase::FadingIn,
            Phase::FadingIn => Phase::Visible,
            Phase::Visible => Phase::FadingOut,
            Phase::FadingOut | Phase::Terminated => Phase::Terminated,
        };
        self.step()
    }

    fn step(&self) -> Step {
        let ms = |v: u32| Duration::from_millis(v as u64);
        match self.phase {
            Phase::Created => Step::Wait(Duration::ZERO),
            Phase::FadingIn => Step::Fade(Fade::fade_in(ms(self.config.fade_in_ms), self.config.fade_in_easing)),
            Phase::Visible => Step::Wait(ms(self.config.hold_ms)),
            Phase::FadingOut => Step::Fade(Fade::fade_out(ms(self.config.fade_out_ms), self.config.fade_out_easing)),
            Phase::Terminated => Step::Exit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TimelineConfig {
        TimelineConfig {
            fade_in_ms: 200,
            hold_ms: 3000,
            fade_out_ms: 200,
            fade_in_easing: Easing::Quad,
            fade_out_easing: Easing::Linear,
        }
    }

    #[test]
    fn test_total_duration() {
        assert_eq!(config().total(), Duration::from_millis(3400));
    }

    #[test]
    fn test_full_sequence() {
        let mut timeline = Timeline::new(config());
        assert_eq!(timeline.phase(), Phase::Created);

        let step = timeline.start();
        assert_eq!(timeline.phase(), Phase::FadingIn);
        assert_eq!(
            step,
            Step::Fade(Fade::fade_in(Duration::from_millis(200), Easing::Quad))
        );

        assert_eq!(timeline.complete(), Step::Wait(Duration::from_millis(3000)));
        assert_eq!(timeline.phase(), Phase::Visible);

        assert_eq!(
            timeline.complete(),
            Step::Fade(Fade::fade_out(Duration::from_millis(200), Easing::Linear))
        );
        assert_eq!(timeline.phase(), Phase::FadingOut);

        assert_eq!(timeline.complete(), Step::Exit);
        assert_eq!(timeline.phase(), Phase::Terminated);
    }

    #[test]
    fn test_terminated_is_absorbing() {
        let mut timeline = Timeline::new(config());
        timeline.start();
        for _ in 0..3 {
            timeline.complete();
        }
        assert_eq!(timeline.complete(), Step::Exit);
        assert_eq!(timeline.phase(), Phase::Terminated);
    }

    #[test]
    fn test_always_terminates_within_bound() {
        // Drive the loop the way the run loop does, summing scheduled time
        let mut timeline = Timeline::new(config());
        let mut scheduled = Duration::ZERO;
        let mut step = timeline.start();
        let mut iterations = 0;
        loop {
            match step {
                Step::Fade(fade) => scheduled += fade.duration,
                Step::Wait(delay) => scheduled += delay,
                Step::Exit => break,
            }
            step = timeline.complete();
            iterations += 1;
            assert!(iterations < 10, "timeline did not terminate");
        }
        assert_eq!(scheduled, config().total());
    }
}
