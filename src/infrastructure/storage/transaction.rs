//! Transaction coordination for multi-step storage pipelines

use futures::future::BoxFuture;
use sqlx::postgres::PgPool;
use sqlx::PgConnection;
use tracing::warn;

use crate::domain::DomainError;

/// Brackets a pipeline of storage steps with begin/commit/rollback.
///
/// One connection is checked out of the pool per `run` invocation and the
/// raw connection never escapes the pipeline closure. Steps compose
/// sequentially inside the closure with `?`; the first error rolls the
/// transaction back and is returned to the caller unmodified.
#[derive(Debug, Clone)]
pub struct TransactionCoordinator {
    pool: PgPool,
}

impl TransactionCoordinator {
    /// Create a coordinator over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run a pipeline inside a single transaction.
    ///
    /// Commits when the pipeline returns `Ok`, rolls back otherwise. The
    /// connection is released back to the pool on every exit path,
    /// including a failed rollback (the transaction guard rolls back on
    /// drop if the explicit directive did not reach the server).
    pub async fn run<T, F>(&self, pipeline: F) -> Result<T, DomainError>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut PgConnection) -> BoxFuture<'t, Result<T, DomainError>> + Send,
    {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        match pipeline(&mut tx).await {
            Ok(value) => {
                tx.commit().await.map_err(|e| {
                    DomainError::storage(format!("Failed to commit transaction: {}", e))
                })?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback failed after pipeline error: {}", rollback_err);
                }
                Err(err)
            }
        }
    }
}
