use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Handle for one armed timer. Every arming gets a fresh id, ids are never
/// reused, so a completion can be matched to exactly one arming.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimerId(Uuid);

impl TimerId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", content = "data")]
pub enum TimerOperation {
    /// Arm a one-shot timer; the shell resolves it after `millis`.
    Start { id: TimerId, millis: u64 },
    /// Disarm: the shell releases the timer and must not resolve it as
    /// elapsed afterwards.
    Clear { id: TimerId },
}

impl Operation for TimerOperation {
    type Output = TimerOutput;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum TimerOutput {
    Elapsed { id: TimerId },
    Cleared { id: TimerId },
}

impl TimerOutput {
    #[must_use]
    pub const fn id(&self) -> TimerId {
        match self {
            Self::Elapsed { id } | Self::Cleared { id } => *id,
        }
    }

    /// The id, but only for a genuine expiry. `Cleared` acknowledgements
    /// never count as fires.
    #[must_use]
    pub const fn elapsed(&self) -> Option<TimerId> {
        match self {
            Self::Elapsed { id } => Some(*id),
            Self::Cleared { .. } => None,
        }
    }
}

#[derive(Clone)]
pub struct Timer<E> {
    context: CapabilityContext<TimerOperation, E>,
}

impl<Ev> Capability<Ev> for Timer<Ev> {
    type Operation = TimerOperation;
    type MappedSelf<MappedEv> = Timer<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Timer::new(self.context.map_event(f))
    }
}

impl<E> Timer<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<TimerOperation, E>) -> Self {
        Self { context }
    }

    /// Arms a one-shot timer and returns its handle. `make_event` wraps the
    /// shell's resolution; the caller keeps the handle and must treat any
    /// completion carrying a different id as stale.
    pub fn start<F>(&self, duration: Duration, make_event: F) -> TimerId
    where
        F: Fn(TimerOutput) -> E + Send + Sync + 'static,
    {
        let id = TimerId::generate();
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        let context = self.context.clone();
        self.context.spawn(async move {
            let output = context
                .request_from_shell(TimerOperation::Start { id, millis })
                .await;
            context.update_app(make_event(output));
        });
        id
    }

    /// Disarms a timer. Fire-and-forget: the shell releases the underlying
    /// resource and the pending `Start` for this id never elapses.
    pub fn clear(&self, id: TimerId) {
        let context = self.context.clone();
        self.context.spawn(async move {
            context.notify_shell(TimerOperation::Clear { id }).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_ids_are_unique() {
        let a = TimerId::generate();
        let b = TimerId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_output_id_extraction() {
        let id = TimerId::generate();
        assert_eq!(TimerOutput::Elapsed { id }.id(), id);
        assert_eq!(TimerOutput::Cleared { id }.id(), id);
    }

    #[test]
    fn test_only_elapsed_counts_as_fire() {
        let id = TimerId::generate();
        assert_eq!(TimerOutput::Elapsed { id }.elapsed(), Some(id));
        assert_eq!(TimerOutput::Cleared { id }.elapsed(), None);
    }

    #[test]
    fn test_timer_operation_serialization() {
        let op = TimerOperation::Start {
            id: TimerId::generate(),
            millis: 1_000,
        };
        let json = serde_json::to_string(&op).unwrap();
        let deserialized: TimerOperation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, deserialized);
    }

    #[test]
    fn test_timer_output_serialization() {
        let output = TimerOutput::Elapsed {
            id: TimerId::generate(),
        };
        let json = serde_json::to_string(&output).unwrap();
        let deserialized: TimerOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(output, deserialized);
    }

    #[test]
    fn test_map_event_takes_plain_handlers() {
        use crate::event::Event;

        // Wrapping into a parent event type only demands Fn + Send + Sync of
        // the handler.
        fn compose<F>(timer: &Timer<Event>, wrap: F) -> Timer<Event>
        where
            F: Fn(Event) -> Event + Send + Sync + 'static,
        {
            timer.map_event(wrap)
        }

        let _check: fn(&Timer<Event>, fn(Event) -> Event) -> Timer<Event> = compose;
    }
}
