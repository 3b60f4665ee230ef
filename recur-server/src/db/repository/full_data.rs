//! Bulk replace
//!
//! Wipes a tenant's tasks and tags and rebuilds them from a client snapshot.
//! Everything runs in one transaction: a constraint violation anywhere leaves
//! the previous data untouched.

use std::collections::HashMap;

use shared::models::{FullData, FullDataImport, TagSpec, Task};
use sqlx::{SqliteConnection, SqlitePool};

use super::RepoResult;
use super::tag::{delete_all_tags_in, insert_tag_in};
use super::task::{delete_all_tasks_in, insert_task_in, list_tasks_in};
use super::task_tag::sync_task_tags;
use crate::db::tx::UnitOfWork;
use crate::utils::validation::validate_snapshot;

/// Replace everything `user_id` owns with `snapshot` and return what was stored
pub async fn replace_all(
    pool: &SqlitePool,
    user_id: i64,
    snapshot: &FullDataImport,
) -> RepoResult<FullData> {
    validate_snapshot(snapshot)?;

    let mut uow = UnitOfWork::begin(pool, "replace_all").await?;
    let result = replace_in(uow.conn(), user_id, snapshot).await;
    let data = uow.finish(result).await?;

    tracing::info!(
        user_id,
        tasks = data.tasks.len(),
        tags = data.tags.len(),
        "Full data replaced"
    );
    Ok(data)
}

async fn replace_in(
    conn: &mut SqliteConnection,
    user_id: i64,
    snapshot: &FullDataImport,
) -> RepoResult<FullData> {
    // Tags first: their links cascade away before the tasks go
    let old_tags = delete_all_tags_in(&mut *conn, user_id).await?;
    let old_tasks = delete_all_tasks_in(&mut *conn, user_id).await?;
    tracing::debug!(user_id, old_tags, old_tasks, "Cleared tenant data");

    let mut tag_ids: HashMap<String, String> = HashMap::with_capacity(snapshot.tags.len());
    let mut tags = Vec::with_capacity(snapshot.tags.len());
    for entry in &snapshot.tags {
        let tag = insert_tag_in(&mut *conn, user_id, &entry.name).await?;
        tag_ids.insert(tag.name.clone(), tag.id.clone());
        tags.push(tag);
    }

    let today = shared::util::today();
    for entry in &snapshot.tasks {
        let task = Task {
            id: shared::util::new_resource_id(),
            user_id,
            name: entry.name.clone(),
            duration: entry.duration,
            duration_unit: entry.duration_unit,
            start_date: entry.start_date.unwrap_or(today),
            repeating: entry.repeating,
            notification_option: entry.notification_option,
        };
        insert_task_in(&mut *conn, &task).await?;

        // Stale ids are gone, so nested refs resolve by name. A name missing
        // from the tag list becomes a new tag shared by later tasks.
        let specs: Vec<TagSpec> = entry
            .tags
            .iter()
            .map(|r| match tag_ids.get(&r.name) {
                Some(id) => TagSpec::existing(id.as_str()),
                None => TagSpec::new_named(r.name.as_str()),
            })
            .collect();
        let linked = sync_task_tags(&mut *conn, &task.id, user_id, &specs).await?;
        for tag in linked {
            if !tag_ids.contains_key(&tag.name) {
                tag_ids.insert(tag.name.clone(), tag.id.clone());
                tags.push(tag);
            }
        }
    }

    tags.sort_by(|a, b| a.name.cmp(&b.name));
    let tasks = list_tasks_in(conn, user_id).await?;
    Ok(FullData { tasks, tags })
}
