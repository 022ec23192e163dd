use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::registration::{Participant, Registration, RegistrationId};
use crate::domain::repositories::{RegistrationRepository, RepositoryError, RepositoryResult};

/// In-process implementation of RegistrationRepository
///
/// Keeps registrations in insertion order, which serves as its store-native
/// order. Ids are assigned on [`InMemoryRegistrationRepository::insert`],
/// standing in for the store's own id assignment.
#[derive(Default)]
pub struct InMemoryRegistrationRepository {
    records: RwLock<Vec<Registration>>,
}

impl InMemoryRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new registration and returns it with its assigned id
    pub async fn insert(
        &self,
        team: impl Into<String>,
        event: impl Into<String>,
        participants: Vec<Participant>,
    ) -> Registration {
        let registration = Registration::from_persistence(
            RegistrationId::generate(),
            team.into(),
            event.into(),
            participants,
        );
        self.records.write().await.push(registration.clone());
        registration
    }

    /// Number of stored registrations
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Registration>> {
        Ok(self.records.read().await.clone())
    }

    async fn list_by_event(&self, event: &str) -> RepositoryResult<Vec<Registration>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.event() == event)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Registration>> {
        let Some(id) = RegistrationId::parse(id) else {
            return Ok(None);
        };

        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn update_participants(
        &self,
        id: &str,
        participants: Vec<Participant>,
    ) -> RepositoryResult<Registration> {
        let parsed = RegistrationId::parse(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id() == parsed)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        record.replace_participants(participants);
        Ok(record.clone())
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        if let Some(parsed) = RegistrationId::parse(id) {
            self.records.write().await.retain(|r| r.id() != parsed);
        }
        Ok(())
    }
}
