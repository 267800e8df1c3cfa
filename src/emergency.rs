use serde::{Deserialize, Serialize};

use crate::capabilities::{TimerId, TimerOutput};
use crate::COUNTDOWN_SECONDS;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyStatus {
    #[default]
    Idle,
    Active { countdown_seconds: u8 },
}

/// What one countdown completion amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownStep {
    /// The completion did not belong to the currently armed shot; state
    /// was left untouched.
    Stale,
    Ticked { remaining: u8 },
}

/// The SOS state machine. Owns the handle of the armed countdown shot so a
/// completion can be checked against it; a handle that left this struct via
/// [`cancel`](Self::cancel) or [`release_timer`](Self::release_timer) must
/// be cleared with the shell by the caller.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct EmergencySession {
    status: EmergencyStatus,
    countdown_timer: Option<TimerId>,
}

impl EmergencySession {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, EmergencyStatus::Active { .. })
    }

    #[must_use]
    pub const fn status(&self) -> EmergencyStatus {
        self.status
    }

    /// The value a countdown display should show. Idle reads as the full
    /// window, so the display is already correct the instant a trigger
    /// lands.
    #[must_use]
    pub const fn countdown_seconds(&self) -> u8 {
        match self.status {
            EmergencyStatus::Idle => COUNTDOWN_SECONDS,
            EmergencyStatus::Active { countdown_seconds } => countdown_seconds,
        }
    }

    #[must_use]
    pub const fn armed_timer(&self) -> Option<TimerId> {
        self.countdown_timer
    }

    /// Engages emergency mode with a full countdown. Returns false when
    /// already engaged; the running countdown keeps its shot and its value.
    pub fn trigger(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.status = EmergencyStatus::Active {
            countdown_seconds: COUNTDOWN_SECONDS,
        };
        true
    }

    /// Disengages, from any state. Returns the armed countdown handle so
    /// the caller can clear it with the shell.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.status = EmergencyStatus::Idle;
        self.countdown_timer.take()
    }

    /// Records the handle of the countdown shot just started.
    pub fn arm(&mut self, id: TimerId) {
        self.countdown_timer = Some(id);
    }

    /// Takes the armed handle without touching the status. Session
    /// teardown path.
    pub fn release_timer(&mut self) -> Option<TimerId> {
        self.countdown_timer.take()
    }

    /// Applies one countdown completion. Anything that is not the armed
    /// shot elapsing (cleared acknowledgements, handles from a cancelled
    /// countdown) is reported stale and changes nothing.
    pub fn on_tick(&mut self, output: &TimerOutput) -> CountdownStep {
        let Some(id) = output.elapsed() else {
            return CountdownStep::Stale;
        };
        if self.countdown_timer != Some(id) {
            return CountdownStep::Stale;
        }
        self.countdown_timer = None;

        match &mut self.status {
            EmergencyStatus::Active { countdown_seconds } if *countdown_seconds > 0 => {
                *countdown_seconds -= 1;
                CountdownStep::Ticked {
                    remaining: *countdown_seconds,
                }
            }
            _ => CountdownStep::Stale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ticked(session: &mut EmergencySession) -> CountdownStep {
        let id = TimerId::generate();
        session.arm(id);
        session.on_tick(&TimerOutput::Elapsed { id })
    }

    #[test]
    fn trigger_engages_with_full_countdown() {
        let mut session = EmergencySession::default();
        assert!(session.trigger());
        assert!(session.is_active());
        assert_eq!(session.countdown_seconds(), COUNTDOWN_SECONDS);
    }

    #[test]
    fn second_trigger_is_a_noop() {
        let mut session = EmergencySession::default();
        assert!(session.trigger());
        assert_eq!(ticked(&mut session), CountdownStep::Ticked { remaining: 4 });

        assert!(!session.trigger());
        // The running countdown keeps its value rather than restarting.
        assert_eq!(session.countdown_seconds(), 4);
    }

    #[test]
    fn cancel_resets_and_surrenders_the_timer() {
        let mut session = EmergencySession::default();
        session.trigger();
        let id = TimerId::generate();
        session.arm(id);

        assert_eq!(session.cancel(), Some(id));
        assert!(!session.is_active());
        assert_eq!(session.countdown_seconds(), COUNTDOWN_SECONDS);
    }

    #[test]
    fn cancel_when_idle_is_a_noop() {
        let mut session = EmergencySession::default();
        assert_eq!(session.cancel(), None);
        assert!(!session.is_active());
    }

    #[test]
    fn countdown_runs_to_zero_and_latches() {
        let mut session = EmergencySession::default();
        session.trigger();
        for expected in (0..COUNTDOWN_SECONDS).rev() {
            assert_eq!(
                ticked(&mut session),
                CountdownStep::Ticked {
                    remaining: expected
                }
            );
        }
        // Exhausted but still engaged until an explicit cancel.
        assert!(session.is_active());
        assert_eq!(session.countdown_seconds(), 0);
    }

    #[test]
    fn tick_with_wrong_id_is_stale() {
        let mut session = EmergencySession::default();
        session.trigger();
        session.arm(TimerId::generate());

        let other = TimerId::generate();
        let step = session.on_tick(&TimerOutput::Elapsed { id: other });
        assert_eq!(step, CountdownStep::Stale);
        assert_eq!(session.countdown_seconds(), COUNTDOWN_SECONDS);
    }

    #[test]
    fn cleared_acknowledgement_is_stale() {
        let mut session = EmergencySession::default();
        session.trigger();
        let id = TimerId::generate();
        session.arm(id);

        let step = session.on_tick(&TimerOutput::Cleared { id });
        assert_eq!(step, CountdownStep::Stale);
        assert_eq!(session.countdown_seconds(), COUNTDOWN_SECONDS);
    }

    #[test]
    fn tick_after_cancel_is_stale() {
        let mut session = EmergencySession::default();
        session.trigger();
        let id = TimerId::generate();
        session.arm(id);
        session.cancel();

        let step = session.on_tick(&TimerOutput::Elapsed { id });
        assert_eq!(step, CountdownStep::Stale);
        assert!(!session.is_active());
        assert_eq!(session.countdown_seconds(), COUNTDOWN_SECONDS);
    }

    proptest! {
        #[test]
        fn state_follows_the_last_call(calls in proptest::collection::vec(any::<bool>(), 1..32)) {
            let mut session = EmergencySession::default();
            for &trigger in &calls {
                if trigger {
                    session.trigger();
                } else {
                    session.cancel();
                }
            }
            prop_assert_eq!(session.is_active(), *calls.last().unwrap());
        }

        #[test]
        fn cancel_always_restores_the_full_window(ticks in 0u8..=COUNTDOWN_SECONDS) {
            let mut session = EmergencySession::default();
            session.trigger();
            for _ in 0..ticks {
                let id = TimerId::generate();
                session.arm(id);
                session.on_tick(&TimerOutput::Elapsed { id });
            }
            session.cancel();
            prop_assert_eq!(session.countdown_seconds(), COUNTDOWN_SECONDS);
        }
    }
}
