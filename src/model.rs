use serde::{Deserialize, Serialize};

use crate::capabilities::TimerId;
use crate::contacts::{ContactsRegistry, NewContactDraft};
use crate::emergency::EmergencySession;
use crate::location::LiveLocation;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Home,
    Contacts,
    Routes,
    Resources,
    Settings,
}

/// Switch states for the settings tab. The mockup ships them pre-set and
/// wires no toggle interaction.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettingsState {
    pub high_accuracy_location: bool,
    pub background_location: bool,
    pub sound_alerts: bool,
    pub automatic_recording: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            high_accuracy_location: true,
            background_location: true,
            sound_alerts: false,
            automatic_recording: true,
        }
    }
}

/// The whole session state. `Default` is the launch state: home tab, seeded
/// roster, cold location, everything idle and closed.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Model {
    pub active_tab: Tab,
    pub menu_open: bool,
    pub add_contact_open: bool,
    pub draft: NewContactDraft,
    pub emergency: EmergencySession,
    pub contacts: ContactsRegistry,
    pub location: LiveLocation,
    pub settings: SettingsState,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            active_tab: Tab::Home,
            menu_open: false,
            add_contact_open: false,
            draft: NewContactDraft::default(),
            emergency: EmergencySession::default(),
            contacts: ContactsRegistry::seeded(),
            location: LiveLocation::default(),
            settings: SettingsState::default(),
        }
    }
}

impl Model {
    /// Takes every armed timer handle across the model. The caller owes
    /// each one a clear with the shell.
    pub fn release_timers(&mut self) -> Vec<TimerId> {
        let mut handles = self.location.release_timers();
        handles.extend(self.emergency.release_timer());
        handles
    }
}
