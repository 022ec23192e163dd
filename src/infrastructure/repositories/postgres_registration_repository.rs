use async_trait::async_trait;
use sqlx::types::Json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::registration::{Participant, Registration, RegistrationId};
use crate::domain::repositories::{RegistrationRepository, RepositoryError, RepositoryResult};
use crate::infrastructure::store::StoreConnector;

/// Row shape of the `registrations` table
///
/// `participants` is stored as a JSONB document so that the ordered list is
/// read and replaced as a single value.
#[derive(Debug, sqlx::FromRow)]
struct RegistrationRow {
    id: Uuid,
    team: String,
    event: String,
    participants: Json<Vec<Participant>>,
}

impl From<RegistrationRow> for Registration {
    fn from(row: RegistrationRow) -> Self {
        Registration::from_persistence(
            RegistrationId::from(row.id),
            row.team,
            row.event,
            row.participants.0,
        )
    }
}

/// PostgreSQL implementation of RegistrationRepository
///
/// Every operation first acquires the shared pool through
/// [`StoreConnector::connect`], which is a no-op once connected.
/// Store-native order is insertion order (`created_at`, then `id`).
pub struct PostgresRegistrationRepository {
    store: Arc<StoreConnector>,
}

impl PostgresRegistrationRepository {
    /// Creates a new PostgresRegistrationRepository
    ///
    /// # Arguments
    /// * `store` - Process-wide connector shared by all repositories
    pub fn new(store: Arc<StoreConnector>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Registration>> {
        let pool = self.store.connect().await?;

        let rows = sqlx::query_as::<_, RegistrationRow>(
            r#"
            SELECT id, team, event, participants
            FROM registrations
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| RepositoryError::Store(format!("Failed to list registrations: {}", e)))?;

        tracing::debug!(count = rows.len(), "Listed all registrations");
        Ok(rows.into_iter().map(Registration::from).collect())
    }

    async fn list_by_event(&self, event: &str) -> RepositoryResult<Vec<Registration>> {
        let pool = self.store.connect().await?;

        let rows = sqlx::query_as::<_, RegistrationRow>(
            r#"
            SELECT id, team, event, participants
            FROM registrations
            WHERE event = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(event)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            RepositoryError::Store(format!("Failed to list registrations by event: {}", e))
        })?;

        tracing::debug!(event, count = rows.len(), "Listed registrations by event");
        Ok(rows.into_iter().map(Registration::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Registration>> {
        let pool = self.store.connect().await?;

        let Some(id) = RegistrationId::parse(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, RegistrationRow>(
            r#"
            SELECT id, team, event, participants
            FROM registrations
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(pool)
        .await
        .map_err(|e| RepositoryError::Store(format!("Failed to find registration by id: {}", e)))?;

        Ok(row.map(Registration::from))
    }

    async fn update_participants(
        &self,
        id: &str,
        participants: Vec<Participant>,
    ) -> RepositoryResult<Registration> {
        let pool = self.store.connect().await?;

        let parsed = RegistrationId::parse(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        // A row deleted concurrently simply matches nothing here; it is never recreated
        let row = sqlx::query_as::<_, RegistrationRow>(
            r#"
            UPDATE registrations
            SET participants = $2
            WHERE id = $1
            RETURNING id, team, event, participants
            "#,
        )
        .bind(parsed.as_uuid())
        .bind(Json(&participants))
        .fetch_optional(pool)
        .await
        .map_err(|e| RepositoryError::Store(format!("Failed to update registration: {}", e)))?;

        match row {
            Some(row) => {
                tracing::debug!(%parsed, count = participants.len(), "Replaced participants");
                Ok(row.into())
            }
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        let pool = self.store.connect().await?;

        let Some(parsed) = RegistrationId::parse(id) else {
            tracing::debug!(id, "Delete ignored: not a store identifier");
            return Ok(());
        };

        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(parsed.as_uuid())
            .execute(pool)
            .await
            .map_err(|e| RepositoryError::Store(format!("Failed to delete registration: {}", e)))?;

        if result.rows_affected() == 0 {
            tracing::debug!(%parsed, "Delete matched no registration");
        }

        Ok(())
    }
}
