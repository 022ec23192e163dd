use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::config::Config;
use crate::domain::repositories::{RepositoryError, RepositoryResult};

/// Upper bound on waiting for a pooled connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Lazily connected handle to the registration store
///
/// One connector is created per process and shared between repositories.
/// The first successful [`StoreConnector::connect`] creates the pool; every
/// later call reuses it. Concurrent first callers wait on the same
/// initialization, so at most one pool is ever created.
///
/// A failed connect leaves the connector empty. The next call tries again;
/// nothing retries automatically.
pub struct StoreConnector {
    database_url: String,
    max_connections: u32,
    pool: OnceCell<PgPool>,
}

impl StoreConnector {
    /// Creates a connector without touching the network
    pub fn new(database_url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections,
            pool: OnceCell::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.database_url.clone(), config.db_max_connections)
    }

    /// Returns the shared pool, connecting on first use
    ///
    /// # Errors
    /// [`RepositoryError::Connection`] if the URL is malformed, the store is
    /// unreachable, or the schema cannot be prepared.
    pub async fn connect(&self) -> RepositoryResult<&PgPool> {
        self.pool
            .get_or_try_init(|| async {
                tracing::info!("Connecting to registration store...");

                let pool = PgPoolOptions::new()
                    .max_connections(self.max_connections)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .connect(&self.database_url)
                    .await
                    .map_err(|e| {
                        tracing::error!("Registration store connection failed: {}", e);
                        RepositoryError::Connection(e.to_string())
                    })?;

                ensure_schema(&pool).await?;

                tracing::info!("Registration store connected");
                Ok::<_, RepositoryError>(pool)
            })
            .await
    }

    /// Whether a live pool has been established
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }
}

/// Creates the registrations table on first connect
async fn ensure_schema(pool: &PgPool) -> RepositoryResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS registrations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            team TEXT NOT NULL,
            event TEXT NOT NULL,
            participants JSONB NOT NULL DEFAULT '[]'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| RepositoryError::Connection(format!("Failed to prepare schema: {}", e)))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS registrations_event_idx ON registrations (event)")
        .execute(pool)
        .await
        .map_err(|e| RepositoryError::Connection(format!("Failed to prepare schema: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_connector_is_not_connected() {
        let store = StoreConnector::new("postgresql://localhost/fest", 5);
        assert!(!store.is_connected());
    }

    #[tokio::test]
    async fn malformed_url_yields_connection_error() {
        let store = StoreConnector::new("definitely not a url", 1);

        let result = store.connect().await;

        assert!(matches!(result, Err(RepositoryError::Connection(_))));
        assert!(!store.is_connected());
    }

    #[tokio::test]
    async fn failed_connect_is_retried_on_next_call() {
        let store = StoreConnector::new("definitely not a url", 1);

        assert!(store.connect().await.is_err());
        // Nothing was cached, so the second call attempts again and fails the same way
        assert!(matches!(
            store.connect().await,
            Err(RepositoryError::Connection(_))
        ));
    }
}
