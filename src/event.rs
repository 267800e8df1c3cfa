use serde::{Deserialize, Serialize};

use crate::capabilities::TimerOutput;
use crate::contacts::{ContactId, Relation};
use crate::model::Tab;

/// Everything the shell can feed into the core: user intents plus timer
/// completions routed back from the shell's timer runtime.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    // Session lifecycle
    Started,
    Stopped,

    // Navigation & chrome
    TabSelected(Tab),
    MenuOpened,
    MenuClosed,

    // Emergency
    EmergencyTriggered,
    EmergencyCancelled,

    // Contacts
    SharingToggled { contact_id: ContactId },
    AddContactOpened,
    AddContactClosed,
    DraftNameChanged(String),
    DraftRelationChanged(Option<Relation>),
    DraftPhoneChanged(String),
    ContactSubmitted,

    // Timer completions, never sent by the user
    CountdownTicked(TimerOutput),
    MapProviderLoaded(TimerOutput),
    LocationTicked(TimerOutput),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_round_trips_through_json() {
        let events = vec![
            Event::Started,
            Event::TabSelected(Tab::Resources),
            Event::SharingToggled {
                contact_id: ContactId(2),
            },
            Event::DraftRelationChanged(Some(Relation::Friend)),
        ];
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let back: Event = serde_json::from_str(&json).unwrap();
            assert_eq!(event, back);
        }
    }

    #[test]
    fn event_size_is_reasonable() {
        let size = std::mem::size_of::<Event>();
        assert!(
            size <= 64,
            "Event enum is {} bytes — too large, box more variants",
            size
        );
    }
}
