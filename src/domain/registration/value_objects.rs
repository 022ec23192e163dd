use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Store-assigned identifier of a registration
///
/// # Invariants
/// - Assigned once by the store when the registration is created
/// - Never mutated afterwards
/// - Serialized as its hyphenated text form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Generates a fresh identifier (store implementations only)
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier received from a client
    ///
    /// Returns `None` when the text is not a valid store identifier. Such an
    /// id can never match a stored registration.
    ///
    /// # Example
    /// ```
    /// use fest_admin_api::domain::registration::RegistrationId;
    ///
    /// assert!(RegistrationId::parse("4f1c5a3e-3a35-4d5e-9b1e-2d0f6f0c9a11").is_some());
    /// assert!(RegistrationId::parse("not-an-id").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for RegistrationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single member of a registered team
///
/// Participants have no identity of their own; they live and die with the
/// registration that owns them.
///
/// # Invariants
/// - `name` is not blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub class: String,
    pub contact: String,
}

impl Participant {
    /// Creates a new Participant
    ///
    /// # Returns
    /// * `Ok(Participant)` - If the name is present
    /// * `Err(String)` - If the name is blank
    pub fn new(
        name: impl Into<String>,
        class: impl Into<String>,
        contact: impl Into<String>,
    ) -> Result<Self, String> {
        let participant = Self {
            name: name.into(),
            class: class.into(),
            contact: contact.into(),
        };
        participant.validate()?;
        Ok(participant)
    }

    /// Checks the participant's invariants
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Participant name cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Validates a replacement participant list
///
/// An empty list is accepted: the participant count is never enforced.
pub fn validate_participants(participants: &[Participant]) -> Result<(), String> {
    for (index, participant) in participants.iter().enumerate() {
        participant
            .validate()
            .map_err(|e| format!("Participant {}: {}", index + 1, e))?;
    }
    Ok(())
}
