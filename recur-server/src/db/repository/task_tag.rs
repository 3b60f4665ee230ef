//! Relation synchronizer
//!
//! Sole writer of `tasks_tags`. Given a task and the tag set it should end up
//! with, creates the requested new tags, then applies the difference between
//! the current and desired links. Tags themselves are never renamed or
//! deleted here, even when a link to them goes away.
//!
//! Callers pass a connection bound to an open transaction, so a failure at any
//! step leaves no partial link state behind.

use std::collections::{BTreeSet, HashMap};

use shared::models::{Tag, TagSpec};
use sqlx::SqliteConnection;

use super::RepoResult;
use super::guard::{ResourceKind, ensure_owned};
use super::tag::insert_tag_in;

/// Links to add and remove for one task
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LinkDelta {
    pub to_insert: Vec<String>,
    pub to_delete: Vec<String>,
}

impl LinkDelta {
    pub fn is_empty(&self) -> bool {
        self.to_insert.is_empty() && self.to_delete.is_empty()
    }
}

/// Difference between the current and desired tag-id sets
pub fn diff_links(current: &[String], desired: &[String]) -> LinkDelta {
    let current: BTreeSet<&String> = current.iter().collect();
    let desired: BTreeSet<&String> = desired.iter().collect();
    LinkDelta {
        to_insert: desired.difference(&current).map(|s| (*s).clone()).collect(),
        to_delete: current.difference(&desired).map(|s| (*s).clone()).collect(),
    }
}

// ── Read ──

pub(crate) async fn linked_tag_ids(
    conn: &mut SqliteConnection,
    task_id: &str,
    user_id: i64,
) -> RepoResult<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT tag_id FROM tasks_tags WHERE task_id = ? AND user_id = ?",
    )
    .bind(task_id)
    .bind(user_id)
    .fetch_all(conn)
    .await?;
    Ok(ids)
}

/// Tags currently linked to one task, ordered by name
pub(crate) async fn load_task_tags(
    conn: &mut SqliteConnection,
    task_id: &str,
    user_id: i64,
) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.user_id, t.name
        FROM tasks_tags tt
        JOIN tags t ON t.id = tt.tag_id AND t.user_id = tt.user_id
        WHERE tt.task_id = ? AND tt.user_id = ?
        ORDER BY t.name, t.id
        "#,
    )
    .bind(task_id)
    .bind(user_id)
    .fetch_all(conn)
    .await?;
    Ok(tags)
}

#[derive(sqlx::FromRow)]
struct LinkedTag {
    task_id: String,
    #[sqlx(flatten)]
    tag: Tag,
}

/// Every link of a tenant, grouped by task id
pub(crate) async fn load_tags_by_task(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> RepoResult<HashMap<String, Vec<Tag>>> {
    let rows = sqlx::query_as::<_, LinkedTag>(
        r#"
        SELECT tt.task_id, t.id, t.user_id, t.name
        FROM tasks_tags tt
        JOIN tags t ON t.id = tt.tag_id AND t.user_id = tt.user_id
        WHERE tt.user_id = ?
        ORDER BY t.name, t.id
        "#,
    )
    .bind(user_id)
    .fetch_all(conn)
    .await?;

    let mut by_task: HashMap<String, Vec<Tag>> = HashMap::new();
    for row in rows {
        by_task.entry(row.task_id).or_default().push(row.tag);
    }
    Ok(by_task)
}

// ── Sync ──

/// Make the task's links exactly match `specs` and return the linked tags.
///
/// `New` specs insert a tag owned by `user_id`; repeated names within one
/// call create a single tag. `Existing` ids are linked as-is: an id that is
/// unknown or owned by another tenant fails the composite foreign key on
/// `tasks_tags` with `ForeignKeyViolation`.
pub async fn sync_task_tags(
    conn: &mut SqliteConnection,
    task_id: &str,
    user_id: i64,
    specs: &[TagSpec],
) -> RepoResult<Vec<Tag>> {
    ensure_owned(&mut *conn, ResourceKind::Task, task_id, user_id).await?;

    let mut desired: Vec<String> = Vec::with_capacity(specs.len());
    let mut created: HashMap<&str, String> = HashMap::new();
    for spec in specs {
        let id = match spec {
            TagSpec::Existing { id } => id.clone(),
            TagSpec::New { name } => match created.get(name.as_str()) {
                Some(id) => id.clone(),
                None => {
                    let tag = insert_tag_in(&mut *conn, user_id, name).await?;
                    created.insert(name.as_str(), tag.id.clone());
                    tag.id
                }
            },
        };
        if !desired.contains(&id) {
            desired.push(id);
        }
    }

    let current = linked_tag_ids(&mut *conn, task_id, user_id).await?;
    let delta = diff_links(&current, &desired);

    if !delta.is_empty() {
        tracing::debug!(
            task_id,
            created = created.len(),
            insert = delta.to_insert.len(),
            delete = delta.to_delete.len(),
            "Syncing task tags"
        );
    }

    for tag_id in &delta.to_delete {
        sqlx::query("DELETE FROM tasks_tags WHERE task_id = ? AND tag_id = ? AND user_id = ?")
            .bind(task_id)
            .bind(tag_id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;
    }
    for tag_id in &delta.to_insert {
        sqlx::query("INSERT INTO tasks_tags (task_id, tag_id, user_id) VALUES (?, ?, ?)")
            .bind(task_id)
            .bind(tag_id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;
    }

    load_task_tags(conn, task_id, user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_diff_disjoint_and_overlap() {
        let delta = diff_links(&ids(&["a", "b", "c"]), &ids(&["b", "c", "d"]));
        assert_eq!(delta.to_insert, ids(&["d"]));
        assert_eq!(delta.to_delete, ids(&["a"]));
    }

    #[test]
    fn test_diff_same_set_is_empty() {
        let delta = diff_links(&ids(&["b", "a"]), &ids(&["a", "b", "a"]));
        assert!(delta.is_empty());
    }

    #[test]
    fn test_diff_clear_all() {
        let delta = diff_links(&ids(&["a", "b"]), &[]);
        assert!(delta.to_insert.is_empty());
        assert_eq!(delta.to_delete, ids(&["a", "b"]));
    }

    #[test]
    fn test_diff_from_empty() {
        let delta = diff_links(&[], &ids(&["x", "y"]));
        assert_eq!(delta.to_insert, ids(&["x", "y"]));
        assert!(delta.to_delete.is_empty());
    }
}
