use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContactId(pub u32);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Family,
    Friend,
    EmergencyService,
    #[default]
    Other,
}

impl Relation {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Family => "Family",
            Self::Friend => "Friend",
            Self::EmergencyService => "Emergency Service",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub relation: Relation,
    pub phone: String,
    pub sharing_location: bool,
}

/// Form state for a contact being composed. Lives in the model so the shell
/// can re-render it keystroke by keystroke.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct NewContactDraft {
    pub name: String,
    pub relation: Option<Relation>,
    pub phone: String,
}

impl NewContactDraft {
    /// Both required fields present; mirrors what
    /// [`ContactsRegistry::add_contact`] will accept.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty() && !self.phone.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    Phone,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Phone => "phone",
        })
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContactError {
    #[error("contact draft is missing required field: {field}")]
    MissingRequiredField { field: DraftField },

    #[error("no contact with id {id}")]
    NotFound { id: ContactId },
}

/// The trusted-contacts roster. Insertion order is display order and is
/// never reshuffled.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct ContactsRegistry {
    contacts: Vec<Contact>,
}

impl ContactsRegistry {
    /// The roster a fresh install launches with.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            contacts: vec![
                Contact {
                    id: ContactId(1),
                    name: "Priya Sharma".into(),
                    relation: Relation::Friend,
                    phone: "999-123-4567".into(),
                    sharing_location: false,
                },
                Contact {
                    id: ContactId(2),
                    name: "Maa".into(),
                    relation: Relation::Family,
                    phone: "999-987-6543".into(),
                    sharing_location: true,
                },
                Contact {
                    id: ContactId(3),
                    name: "Police".into(),
                    relation: Relation::EmergencyService,
                    phone: "100".into(),
                    sharing_location: false,
                },
            ],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    #[must_use]
    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    #[must_use]
    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Commits a draft to the roster. An empty name or phone is rejected
    /// with the roster untouched; a missing relation commits as `Other`.
    /// The new contact starts with sharing off and gets the id one above
    /// the current maximum (1 on an empty roster).
    pub fn add_contact(&mut self, draft: &NewContactDraft) -> Result<ContactId, ContactError> {
        if draft.name.is_empty() {
            return Err(ContactError::MissingRequiredField {
                field: DraftField::Name,
            });
        }
        if draft.phone.is_empty() {
            return Err(ContactError::MissingRequiredField {
                field: DraftField::Phone,
            });
        }

        let id = self.next_id();
        self.contacts.push(Contact {
            id,
            name: draft.name.clone(),
            relation: draft.relation.unwrap_or_default(),
            phone: draft.phone.clone(),
            sharing_location: false,
        });
        Ok(id)
    }

    /// Flips one contact's sharing flag and reports the new value.
    pub fn toggle_sharing(&mut self, id: ContactId) -> Result<bool, ContactError> {
        let contact = self
            .contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ContactError::NotFound { id })?;
        contact.sharing_location = !contact.sharing_location;
        Ok(contact.sharing_location)
    }

    /// Contacts currently sharing their location, in insertion order.
    pub fn sharing(&self) -> impl Iterator<Item = &Contact> + '_ {
        self.contacts.iter().filter(|c| c.sharing_location)
    }

    fn next_id(&self) -> ContactId {
        let max = self.contacts.iter().map(|c| c.id.0).max().unwrap_or(0);
        ContactId(max.saturating_add(1))
    }
}
