use async_trait::async_trait;
use thiserror::Error;

use crate::domain::registration::{Participant, Registration};

/// Failures surfaced by registration repositories
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Registration not found: {0}")]
    NotFound(String),

    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Store operation failed: {0}")]
    Store(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository trait for the Registration aggregate
///
/// Ids arrive as the opaque text clients send. An id the store could never
/// have issued matches no record.
///
/// Every operation reaches the store through an idempotent connect, so
/// implementations never require an explicit warm-up call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Every registration, in store-native order
    async fn list_all(&self) -> RepositoryResult<Vec<Registration>>;

    /// Registrations whose event equals `event` exactly (case-sensitive)
    ///
    /// Relative order matches [`RegistrationRepository::list_all`].
    async fn list_by_event(&self, event: &str) -> RepositoryResult<Vec<Registration>>;

    /// Find a registration by its ID
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Registration>>;

    /// Replace the participant list of a registration
    ///
    /// Team and event are never touched. Fails with
    /// [`RepositoryError::NotFound`] without mutating anything when no
    /// registration has this id.
    async fn update_participants(
        &self,
        id: &str,
        participants: Vec<Participant>,
    ) -> RepositoryResult<Registration>;

    /// Permanently delete a registration
    ///
    /// Deleting an id that matches nothing succeeds without error.
    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()>;
}
