//! Tag store

use shared::models::{Tag, TagCreate, TagUpdate};
use sqlx::{SqliteConnection, SqlitePool};

use super::RepoResult;
use super::guard::{ResourceKind, not_found};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

// ── Read ──

pub async fn list_tags(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT id, user_id, name FROM tags WHERE user_id = ? ORDER BY name, id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(tags)
}

pub async fn get_tag(pool: &SqlitePool, user_id: i64, id: &str) -> RepoResult<Tag> {
    let mut conn = pool.acquire().await?;
    find_tag_in(&mut conn, user_id, id)
        .await?
        .ok_or_else(|| not_found(ResourceKind::Tag, id))
}

pub(crate) async fn find_tag_in(
    conn: &mut SqliteConnection,
    user_id: i64,
    id: &str,
) -> RepoResult<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>(
        "SELECT id, user_id, name FROM tags WHERE id = ? AND user_id = ?",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(conn)
    .await?;
    Ok(tag)
}

// ── Write ──

/// Insert a tag owned by `user_id` with a fresh server id
pub(crate) async fn insert_tag_in(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
) -> RepoResult<Tag> {
    let tag = Tag {
        id: shared::util::new_resource_id(),
        user_id,
        name: name.to_string(),
    };
    sqlx::query("INSERT INTO tags (id, user_id, name) VALUES (?, ?, ?)")
        .bind(&tag.id)
        .bind(tag.user_id)
        .bind(&tag.name)
        .execute(conn)
        .await?;
    Ok(tag)
}

pub async fn create_tag(pool: &SqlitePool, user_id: i64, data: &TagCreate) -> RepoResult<Tag> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    let mut conn = pool.acquire().await?;
    insert_tag_in(&mut conn, user_id, &data.name).await
}

pub async fn update_tag(
    pool: &SqlitePool,
    user_id: i64,
    id: &str,
    data: &TagUpdate,
) -> RepoResult<Tag> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    let tag = sqlx::query_as::<_, Tag>(
        "UPDATE tags SET name = ? WHERE id = ? AND user_id = ? RETURNING id, user_id, name",
    )
    .bind(&data.name)
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    tag.ok_or_else(|| not_found(ResourceKind::Tag, id))
}

/// Delete a tag; its task links go with it through the cascade
pub async fn delete_tag(pool: &SqlitePool, user_id: i64, id: &str) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM tags WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(not_found(ResourceKind::Tag, id));
    }
    Ok(())
}

pub(crate) async fn delete_all_tags_in(conn: &mut SqliteConnection, user_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM tags WHERE user_id = ?")
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected())
}
