//! Task store

use chrono::NaiveDate;
use shared::models::{Task, TaskFull, TaskPayload};
use sqlx::{SqliteConnection, SqlitePool};

use super::guard::{ResourceKind, not_found};
use super::task_tag::{load_tags_by_task, load_task_tags, sync_task_tags};
use super::RepoResult;
use crate::db::tx::UnitOfWork;
use crate::utils::validation::validate_task_payload;

const TASK_COLUMNS: &str =
    "id, user_id, name, duration, duration_unit, start_date, repeating, notification_option";

// ── Read ──

/// All tasks of a tenant with their tags, by start date then name
pub async fn list_tasks(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<TaskFull>> {
    let mut conn = pool.acquire().await?;
    list_tasks_in(&mut conn, user_id).await
}

pub(crate) async fn list_tasks_in(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> RepoResult<Vec<TaskFull>> {
    let sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ? ORDER BY start_date, name, id"
    );
    let tasks = sqlx::query_as::<_, Task>(&sql)
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

    let mut tags = load_tags_by_task(conn, user_id).await?;
    Ok(tasks
        .into_iter()
        .map(|task| {
            let tags = tags.remove(&task.id).unwrap_or_default();
            TaskFull { task, tags }
        })
        .collect())
}

pub async fn get_task(pool: &SqlitePool, user_id: i64, id: &str) -> RepoResult<TaskFull> {
    let mut conn = pool.acquire().await?;
    get_task_in(&mut conn, user_id, id).await
}

pub(crate) async fn get_task_in(
    conn: &mut SqliteConnection,
    user_id: i64,
    id: &str,
) -> RepoResult<TaskFull> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ? AND user_id = ?");
    let task = sqlx::query_as::<_, Task>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| not_found(ResourceKind::Task, id))?;
    let tags = load_task_tags(conn, id, user_id).await?;
    Ok(TaskFull { task, tags })
}

/// Take the write lock on a task row and return it.
///
/// SQLite has no `SELECT ... FOR UPDATE`. A no-op UPDATE as the first
/// statement of a transaction acquires the write lock before anything is
/// read, so a concurrent writer waits for us and then sees our result.
pub(crate) async fn lock_task_in(
    conn: &mut SqliteConnection,
    user_id: i64,
    id: &str,
) -> RepoResult<Task> {
    let sql = format!(
        "UPDATE tasks SET repeating = repeating WHERE id = ? AND user_id = ? RETURNING {TASK_COLUMNS}"
    );
    sqlx::query_as::<_, Task>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| not_found(ResourceKind::Task, id))
}

// ── Write ──

/// Build a task row owned by `user_id` with a fresh server id
pub(crate) fn new_task_row(user_id: i64, payload: &TaskPayload, today: NaiveDate) -> Task {
    Task {
        id: shared::util::new_resource_id(),
        user_id,
        name: payload.name.clone(),
        duration: payload.duration,
        duration_unit: payload.duration_unit,
        start_date: payload.start_date.unwrap_or(today),
        repeating: payload.repeating,
        notification_option: payload.notification_option,
    }
}

pub(crate) async fn insert_task_in(conn: &mut SqliteConnection, task: &Task) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO tasks (id, user_id, name, duration, duration_unit, start_date, repeating, notification_option)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&task.id)
    .bind(task.user_id)
    .bind(&task.name)
    .bind(task.duration)
    .bind(task.duration_unit)
    .bind(task.start_date)
    .bind(task.repeating)
    .bind(task.notification_option)
    .execute(conn)
    .await?;
    Ok(())
}

pub(crate) async fn delete_task_in(
    conn: &mut SqliteConnection,
    user_id: i64,
    id: &str,
) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(not_found(ResourceKind::Task, id));
    }
    Ok(())
}

pub(crate) async fn delete_all_tasks_in(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM tasks WHERE user_id = ?")
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected())
}

/// Create a task and relate/create its tags in one transaction
pub async fn create_task(
    pool: &SqlitePool,
    user_id: i64,
    payload: &TaskPayload,
) -> RepoResult<TaskFull> {
    validate_task_payload(payload)?;

    let mut uow = UnitOfWork::begin(pool, "create_task").await?;
    let result = create_task_in(uow.conn(), user_id, payload).await;
    uow.finish(result).await
}

async fn create_task_in(
    conn: &mut SqliteConnection,
    user_id: i64,
    payload: &TaskPayload,
) -> RepoResult<TaskFull> {
    let task = new_task_row(user_id, payload, shared::util::today());
    insert_task_in(&mut *conn, &task).await?;
    let specs = payload.tags.as_deref().unwrap_or_default();
    let tags = sync_task_tags(conn, &task.id, user_id, specs).await?;
    Ok(TaskFull { task, tags })
}

/// Update a task's fields and, when `payload.tags` is present, sync its tags
pub async fn update_task(
    pool: &SqlitePool,
    user_id: i64,
    id: &str,
    payload: &TaskPayload,
) -> RepoResult<TaskFull> {
    validate_task_payload(payload)?;

    let mut uow = UnitOfWork::begin(pool, "update_task").await?;
    let result = update_task_in(uow.conn(), user_id, id, payload).await;
    uow.finish(result).await
}

async fn update_task_in(
    conn: &mut SqliteConnection,
    user_id: i64,
    id: &str,
    payload: &TaskPayload,
) -> RepoResult<TaskFull> {
    let sql = format!(
        r#"
        UPDATE tasks
        SET name = ?, duration = ?, duration_unit = ?, start_date = COALESCE(?, start_date),
            repeating = ?, notification_option = ?
        WHERE id = ? AND user_id = ?
        RETURNING {TASK_COLUMNS}
        "#
    );
    let task = sqlx::query_as::<_, Task>(&sql)
        .bind(&payload.name)
        .bind(payload.duration)
        .bind(payload.duration_unit)
        .bind(payload.start_date)
        .bind(payload.repeating)
        .bind(payload.notification_option)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| not_found(ResourceKind::Task, id))?;

    let tags = match &payload.tags {
        Some(specs) => sync_task_tags(conn, id, user_id, specs).await?,
        None => load_task_tags(conn, id, user_id).await?,
    };
    Ok(TaskFull { task, tags })
}

/// Delete a task; its links go with it through the cascade
pub async fn delete_task(pool: &SqlitePool, user_id: i64, id: &str) -> RepoResult<()> {
    let mut conn = pool.acquire().await?;
    delete_task_in(&mut conn, user_id, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::{RepoError, tag, user};
    use shared::models::{DurationUnit, NotificationOption, TagCreate, TagSpec};

    async fn setup() -> (DbService, i64) {
        let db = DbService::in_memory().await.unwrap();
        let alice = user::find_or_create_user(&db.pool, "alice").await.unwrap();
        (db, alice.id)
    }

    fn payload(name: &str) -> TaskPayload {
        TaskPayload {
            name: name.into(),
            duration: 2,
            duration_unit: DurationUnit::Week,
            start_date: None,
            repeating: false,
            notification_option: NotificationOption::Overdue,
            tags: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_start_date_to_today() {
        let (db, alice) = setup().await;
        let task = create_task(&db.pool, alice, &payload("Water plants"))
            .await
            .unwrap();
        assert_eq!(task.task.start_date, shared::util::today());
        assert_eq!(task.task.user_id, alice);
        assert!(task.tags.is_empty());
        assert_eq!(get_task(&db.pool, alice, &task.task.id).await.unwrap(), task);
    }

    #[tokio::test]
    async fn test_update_without_tags_keeps_links() {
        let (db, alice) = setup().await;
        let mut p = payload("Water plants");
        p.tags = Some(vec![TagSpec::new_named("garden")]);
        let created = create_task(&db.pool, alice, &p).await.unwrap();
        assert_eq!(created.tags.len(), 1);

        let mut edit = payload("Water all plants");
        edit.duration = 3;
        let updated = update_task(&db.pool, alice, &created.task.id, &edit)
            .await
            .unwrap();
        assert_eq!(updated.task.name, "Water all plants");
        assert_eq!(updated.task.duration, 3);
        assert_eq!(updated.task.start_date, created.task.start_date);
        assert_eq!(updated.tags, created.tags);
    }

    #[tokio::test]
    async fn test_update_with_empty_tags_clears_links_but_keeps_tags() {
        let (db, alice) = setup().await;
        let mut p = payload("Water plants");
        p.tags = Some(vec![TagSpec::new_named("garden")]);
        let created = create_task(&db.pool, alice, &p).await.unwrap();

        let mut edit = payload("Water plants");
        edit.tags = Some(vec![]);
        let updated = update_task(&db.pool, alice, &created.task.id, &edit)
            .await
            .unwrap();
        assert!(updated.tags.is_empty());
        assert_eq!(tag::list_tags(&db.pool, alice).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_task() {
        let (db, alice) = setup().await;
        assert!(matches!(
            update_task(&db.pool, alice, "missing", &payload("x")).await,
            Err(RepoError::TaskNotFound(_))
        ));
        assert!(matches!(
            delete_task(&db.pool, alice, "missing").await,
            Err(RepoError::TaskNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_payload_writes_nothing() {
        let (db, alice) = setup().await;
        let mut p = payload("x");
        p.duration = 0;
        p.tags = Some(vec![TagSpec::new_named("orphan")]);
        let err = create_task(&db.pool, alice, &p).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert!(tag::list_tags(&db.pool, alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_orders_by_start_date_then_name() {
        let (db, alice) = setup().await;
        let mut late = payload("a late");
        late.start_date = NaiveDate::from_ymd_opt(2030, 1, 1);
        let mut early_b = payload("b early");
        early_b.start_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        let mut early_a = payload("a early");
        early_a.start_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        for p in [&late, &early_b, &early_a] {
            create_task(&db.pool, alice, p).await.unwrap();
        }

        let bills = tag::create_tag(&db.pool, alice, &TagCreate { name: "bills".into() })
            .await
            .unwrap();
        let mut tagged = payload("tagged");
        tagged.start_date = NaiveDate::from_ymd_opt(2040, 1, 1);
        tagged.tags = Some(vec![TagSpec::existing(&bills.id)]);
        create_task(&db.pool, alice, &tagged).await.unwrap();

        let names: Vec<String> = list_tasks(&db.pool, alice)
            .await
            .unwrap()
            .into_iter()
            .map(|t| {
                if t.task.name == "tagged" {
                    assert_eq!(t.tags, vec![bills.clone()]);
                } else {
                    assert!(t.tags.is_empty());
                }
                t.task.name
            })
            .collect();
        assert_eq!(names, ["a early", "b early", "a late", "tagged"]);
    }
}
