//! Tenant guard
//!
//! Resolves a resource id against its owner. A missing row and a row owned by
//! somebody else produce the same not-found error, so callers cannot discover
//! ids belonging to other tenants.

use sqlx::SqliteConnection;

use super::{RepoError, RepoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Task,
    Tag,
}

impl ResourceKind {
    fn table(self) -> &'static str {
        match self {
            Self::Task => "tasks",
            Self::Tag => "tags",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Tag => "Tag",
        }
    }
}

/// Fail with the kind's not-found error unless `(id, user_id)` names an existing row
pub async fn ensure_owned(
    conn: &mut SqliteConnection,
    kind: ResourceKind,
    id: &str,
    user_id: i64,
) -> RepoResult<()> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ? AND user_id = ?)",
        kind.table()
    );
    let exists: i64 = sqlx::query_scalar(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_one(conn)
        .await?;
    if exists != 0 {
        Ok(())
    } else {
        Err(not_found(kind, id))
    }
}

pub(crate) fn not_found(kind: ResourceKind, id: &str) -> RepoError {
    let msg = format!("{} {} not found", kind.label(), id);
    match kind {
        ResourceKind::Task => RepoError::TaskNotFound(msg),
        ResourceKind::Tag => RepoError::TagNotFound(msg),
    }
}
