//! Completion engine
//!
//! Completing a task deletes it. A repeating task is replaced in the same
//! transaction by a successor: same fields, fresh id, start date reset to the
//! completion day, linked to the same tag ids as the original.

use chrono::NaiveDate;
use shared::models::{CompletionOutcome, TagSpec, Task, TaskFull};
use sqlx::{SqliteConnection, SqlitePool};

use super::RepoResult;
use super::task::{delete_task_in, insert_task_in, lock_task_in};
use super::task_tag::{linked_tag_ids, sync_task_tags};
use crate::db::tx::UnitOfWork;

/// Next occurrence of a repeating task
pub fn successor_of(task: &Task, today: NaiveDate) -> Task {
    Task {
        id: shared::util::new_resource_id(),
        user_id: task.user_id,
        name: task.name.clone(),
        duration: task.duration,
        duration_unit: task.duration_unit,
        start_date: today,
        repeating: true,
        notification_option: task.notification_option,
    }
}

/// Retire a task, spawning its successor when it repeats.
///
/// A second completer of the same task finds it gone and gets `TaskNotFound`.
/// If one of the original tags disappeared in the meantime, relinking fails
/// and nothing is committed.
pub async fn complete_task(
    pool: &SqlitePool,
    user_id: i64,
    task_id: &str,
) -> RepoResult<CompletionOutcome> {
    let mut uow = UnitOfWork::begin(pool, "complete_task").await?;
    let result = complete_in(uow.conn(), user_id, task_id, shared::util::today()).await;
    let outcome = uow.finish(result).await?;

    match outcome.successor() {
        Some(next) => tracing::info!(
            user_id,
            task_id,
            successor_id = %next.task.id,
            "Task completed, successor created"
        ),
        None => tracing::info!(user_id, task_id, "Task completed"),
    }
    Ok(outcome)
}

async fn complete_in(
    conn: &mut SqliteConnection,
    user_id: i64,
    task_id: &str,
    today: NaiveDate,
) -> RepoResult<CompletionOutcome> {
    let original = lock_task_in(&mut *conn, user_id, task_id).await?;
    let tag_ids = linked_tag_ids(&mut *conn, task_id, user_id).await?;

    delete_task_in(&mut *conn, user_id, task_id).await?;

    if !original.repeating {
        return Ok(CompletionOutcome::NoSuccessor);
    }

    let next = successor_of(&original, today);
    insert_task_in(&mut *conn, &next).await?;
    let specs: Vec<TagSpec> = tag_ids.into_iter().map(TagSpec::existing).collect();
    let tags = sync_task_tags(conn, &next.id, user_id, &specs).await?;

    Ok(CompletionOutcome::Successor(TaskFull { task: next, tags }))
}
