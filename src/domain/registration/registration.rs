use serde::{Deserialize, Serialize};

use super::catalog;
use super::value_objects::{Participant, RegistrationId};

/// Registration aggregate root
///
/// A team's entry into a single event together with its ordered participant
/// list.
///
/// # Invariants
/// - `id` is assigned by the store and never changes
/// - Belongs to exactly one team and one event
/// - Participant order is preserved (it drives display and report order)
/// - The participant count is not enforced against the event catalog
///
/// # Example
/// ```
/// use fest_admin_api::domain::registration::{Participant, Registration, RegistrationId};
///
/// let registration = Registration::from_persistence(
///     RegistrationId::generate(),
///     "Byte Busters".to_string(),
///     "Quiz".to_string(),
///     vec![Participant::new("Asha", "XII-B", "9876543210").unwrap()],
/// );
///
/// assert_eq!(registration.team(), "Byte Busters");
/// assert_eq!(registration.participants().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(rename = "_id")]
    id: RegistrationId,
    team: String,
    event: String,
    participants: Vec<Participant>,
}

impl Registration {
    /// Replaces the participant list in place
    ///
    /// Team, event and id are untouched.
    pub fn replace_participants(&mut self, participants: Vec<Participant>) {
        self.participants = participants;
    }

    /// Advisory participant count for this registration's event
    pub fn expected_participants(&self) -> Option<usize> {
        catalog::expected_participants(&self.event)
    }

    // ===== Getters =====

    /// Returns the registration's ID
    pub fn id(&self) -> RegistrationId {
        self.id
    }

    /// Returns the team name
    pub fn team(&self) -> &str {
        &self.team
    }

    /// Returns the event name
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns the participants in registration order
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Reconstructs a Registration from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations, which own id
    /// assignment.
    pub fn from_persistence(
        id: RegistrationId,
        team: String,
        event: String,
        participants: Vec<Participant>,
    ) -> Self {
        Self {
            id,
            team,
            event,
            participants,
        }
    }
}
