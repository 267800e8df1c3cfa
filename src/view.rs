use serde::{Deserialize, Serialize};

use crate::contacts::{Contact, ContactId, Relation};
use crate::model::{Model, SettingsState, Tab};
use crate::resources::{EMERGENCY_NUMBERS, SAFETY_TIPS};
use crate::{PROFILE_EMAIL, PROFILE_NAME};

/// Read-only snapshot the shell renders from. Optional sections are
/// `Some` exactly when their panel is on screen.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub active_tab: Tab,
    pub menu_open: bool,
    pub profile: ProfileViewModel,
    pub emergency: Option<EmergencyViewModel>,
    pub map: MapViewModel,
    pub contacts: Vec<ContactViewModel>,
    pub sharing: Vec<ContactViewModel>,
    pub add_contact: Option<AddContactViewModel>,
    pub resources: Option<ResourcesViewModel>,
    pub settings: Option<SettingsState>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProfileViewModel {
    pub name: String,
    pub email: String,
}

/// The SOS overlay: who is being contacted and where help should go.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EmergencyViewModel {
    pub countdown_seconds: u8,
    pub address: String,
    pub contacting: Vec<ContactViewModel>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MapViewModel {
    pub ready: bool,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Pre-formatted `Lat: 28.6139, Lng: 77.2090` overlay text.
    pub position_label: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ContactViewModel {
    pub id: ContactId,
    pub name: String,
    pub relation: String,
    pub phone: String,
    pub sharing_location: bool,
}

impl From<&Contact> for ContactViewModel {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name.clone(),
            relation: contact.relation.label().to_string(),
            phone: contact.phone.clone(),
            sharing_location: contact.sharing_location,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AddContactViewModel {
    pub name: String,
    pub relation: Option<Relation>,
    pub phone: String,
    pub can_save: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ResourceEntry {
    pub name: String,
    pub number: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ResourcesViewModel {
    pub emergency_numbers: Vec<ResourceEntry>,
    pub safety_tips: Vec<String>,
}

impl From<&Model> for ViewModel {
    fn from(model: &Model) -> Self {
        let contacts: Vec<ContactViewModel> =
            model.contacts.all().iter().map(Into::into).collect();
        let coordinate = model.location.coordinate();

        // While engaged, every registered contact counts as being contacted.
        let emergency = model.emergency.is_active().then(|| EmergencyViewModel {
            countdown_seconds: model.emergency.countdown_seconds(),
            address: model.location.address().to_string(),
            contacting: contacts.clone(),
        });

        Self {
            active_tab: model.active_tab,
            menu_open: model.menu_open,
            profile: ProfileViewModel {
                name: PROFILE_NAME.to_string(),
                email: PROFILE_EMAIL.to_string(),
            },
            emergency,
            map: MapViewModel {
                ready: model.location.is_map_ready(),
                address: model.location.address().to_string(),
                latitude: coordinate.lat(),
                longitude: coordinate.lng(),
                position_label: format!(
                    "Lat: {:.4}, Lng: {:.4}",
                    coordinate.lat(),
                    coordinate.lng()
                ),
            },
            contacts,
            sharing: model.contacts.sharing().map(Into::into).collect(),
            add_contact: model.add_contact_open.then(|| AddContactViewModel {
                name: model.draft.name.clone(),
                relation: model.draft.relation,
                phone: model.draft.phone.clone(),
                can_save: model.draft.is_submittable(),
            }),
            resources: (model.active_tab == Tab::Resources).then(resources_section),
            settings: (model.active_tab == Tab::Settings).then_some(model.settings),
        }
    }
}

fn resources_section() -> ResourcesViewModel {
    ResourcesViewModel {
        emergency_numbers: EMERGENCY_NUMBERS
            .iter()
            .map(|(name, number)| ResourceEntry {
                name: (*name).to_string(),
                number: (*number).to_string(),
            })
            .collect(),
        safety_tips: SAFETY_TIPS.iter().map(|tip| (*tip).to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_view_is_quiet() {
        let view = ViewModel::from(&Model::default());
        assert_eq!(view.active_tab, Tab::Home);
        assert!(!view.menu_open);
        assert!(view.emergency.is_none());
        assert!(view.add_contact.is_none());
        assert!(view.resources.is_none());
        assert!(view.settings.is_none());
        assert!(!view.map.ready);
        assert_eq!(view.contacts.len(), 3);
        assert_eq!(view.profile.name, PROFILE_NAME);
    }

    #[test]
    fn position_label_uses_four_decimals() {
        let view = ViewModel::from(&Model::default());
        assert_eq!(view.map.position_label, "Lat: 28.6139, Lng: 77.2090");
    }

    #[test]
    fn sharing_summary_reflects_the_roster() {
        let mut model = Model::default();
        let view = ViewModel::from(&model);
        let names: Vec<&str> = view.sharing.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Maa"]);

        model.contacts.toggle_sharing(ContactId(1)).unwrap();
        let view = ViewModel::from(&model);
        let names: Vec<&str> = view.sharing.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Priya Sharma", "Maa"]);
    }

    #[test]
    fn emergency_overlay_contacts_everyone() {
        let mut model = Model::default();
        model.emergency.trigger();
        let view = ViewModel::from(&model);

        let overlay = view.emergency.unwrap();
        assert_eq!(overlay.countdown_seconds, 5);
        assert_eq!(overlay.contacting.len(), 3);
        assert_eq!(overlay.address, model.location.address());
    }

    #[test]
    fn resources_section_is_tab_gated() {
        let mut model = Model::default();
        assert!(ViewModel::from(&model).resources.is_none());

        model.active_tab = Tab::Resources;
        let section = ViewModel::from(&model).resources.unwrap();
        assert_eq!(section.emergency_numbers.len(), 5);
        assert_eq!(section.emergency_numbers[0].name, "Police");
        assert_eq!(section.emergency_numbers[0].number, "100");
        assert_eq!(section.safety_tips.len(), 7);
    }

    #[test]
    fn settings_section_is_tab_gated() {
        let mut model = Model::default();
        assert!(ViewModel::from(&model).settings.is_none());

        model.active_tab = Tab::Settings;
        let section = ViewModel::from(&model).settings.unwrap();
        assert!(section.high_accuracy_location);
        assert!(section.background_location);
        assert!(!section.sound_alerts);
        assert!(section.automatic_recording);
    }

    #[test]
    fn form_section_tracks_the_draft() {
        let mut model = Model::default();
        model.add_contact_open = true;
        model.draft.name = "Asha".into();

        let form = ViewModel::from(&model).add_contact.unwrap();
        assert_eq!(form.name, "Asha");
        assert!(!form.can_save);

        model.draft.phone = "555-0100".into();
        let form = ViewModel::from(&model).add_contact.unwrap();
        assert!(form.can_save);
    }
}
