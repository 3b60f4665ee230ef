//! Transaction manager
//!
//! A [`UnitOfWork`] owns one sqlx transaction for the lifetime of a
//! multi-statement operation. Store calls borrow its connection through
//! [`UnitOfWork::conn`]; the operation ends with [`UnitOfWork::finish`], which
//! commits on success and rolls back on failure. A unit dropped without
//! finishing is rolled back by sqlx.

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use super::repository::{RepoError, RepoResult};

pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
    op: &'static str,
}

impl UnitOfWork {
    /// Begin a transaction for the named operation
    pub async fn begin(pool: &SqlitePool, op: &'static str) -> RepoResult<Self> {
        let tx = pool.begin().await?;
        tracing::trace!(op, "transaction started");
        Ok(Self { tx, op })
    }

    /// Connection scoped to this transaction
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.tx
    }

    pub async fn commit(self) -> RepoResult<()> {
        let op = self.op;
        self.tx.commit().await.map_err(|e| {
            tracing::warn!(op, error = %e, "commit failed");
            RepoError::from(e)
        })?;
        tracing::trace!(op, "transaction committed");
        Ok(())
    }

    pub async fn rollback(self) -> RepoResult<()> {
        let op = self.op;
        self.tx.rollback().await?;
        tracing::trace!(op, "transaction rolled back");
        Ok(())
    }

    /// Release the transaction according to `result`.
    ///
    /// `Ok` commits and passes the value through. `Err` rolls back and
    /// returns the original error; a failing rollback is logged but never
    /// replaces that error.
    pub async fn finish<T>(self, result: RepoResult<T>) -> RepoResult<T> {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(err) => {
                let op = self.op;
                tracing::warn!(op, error = %err, "rolling back");
                if let Err(rollback_err) = self.rollback().await {
                    tracing::error!(op, error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}
