//! User registry

use shared::models::User;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

pub async fn find_user_by_subject(pool: &SqlitePool, subject: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, external_subject FROM users WHERE external_subject = ?",
    )
    .bind(subject)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Return the user for `subject`, creating it on first sight.
///
/// Safe to race: when a concurrent caller inserts the same subject first, the
/// unique constraint rejects our insert and the winner's row is read back.
pub async fn find_or_create_user(pool: &SqlitePool, subject: &str) -> RepoResult<User> {
    validate_required_text(subject, "external_subject", MAX_NAME_LEN)?;

    if let Some(user) = find_user_by_subject(pool, subject).await? {
        return Ok(user);
    }

    let inserted = sqlx::query_as::<_, User>(
        "INSERT INTO users (external_subject) VALUES (?) RETURNING id, external_subject",
    )
    .bind(subject)
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(user) => {
            tracing::info!(user_id = user.id, "User created");
            Ok(user)
        }
        Err(e) => match RepoError::from(e) {
            RepoError::UniqueViolation(_) => find_user_by_subject(pool, subject)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("User {subject} not found"))),
            other => Err(other),
        },
    }
}
