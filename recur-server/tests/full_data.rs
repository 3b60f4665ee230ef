mod common;

use common::{rent, setup};
use recur_server::db::repository::{RepoError, full_data, tag, task};
use shared::models::{FullData, FullDataImport, TagSpec};

fn snapshot() -> FullDataImport {
    serde_json::from_value(serde_json::json!({
        "tags": [
            {"id": "stale-1", "user_id": 999, "name": "bills"},
            {"id": "stale-2", "user_id": 999, "name": "home"}
        ],
        "tasks": [
            {
                "id": "stale-task", "user_id": 999,
                "name": "Pay rent", "duration": 1, "duration_unit": "month",
                "start_date": "2024-03-01", "repeating": true,
                "notification_option": "overdue",
                "tags": [{"id": "stale-1", "name": "bills"}, {"name": "home"}]
            },
            {
                "name": "Clean gutters", "duration": 6, "duration_unit": "month",
                "notification_option": "never",
                "tags": [{"name": "outdoor"}]
            },
            {
                "name": "Sweep porch", "duration": 1, "duration_unit": "week",
                "notification_option": "overdue_due",
                "tags": [{"name": "outdoor"}]
            }
        ]
    }))
    .unwrap()
}

/// Shape of a snapshot with ids left out
fn shape(data: &FullData) -> (Vec<(String, Vec<String>)>, Vec<String>) {
    let mut tasks: Vec<(String, Vec<String>)> = data
        .tasks
        .iter()
        .map(|t| {
            let mut names: Vec<String> = t.tags.iter().map(|tag| tag.name.clone()).collect();
            names.sort();
            (t.task.name.clone(), names)
        })
        .collect();
    tasks.sort();
    let tags = data.tags.iter().map(|t| t.name.clone()).collect();
    (tasks, tags)
}

#[tokio::test]
async fn test_replace_assigns_ids_and_owner() {
    let t = setup().await;
    let pool = &t.db.pool;
    task::create_task(pool, t.alice, &rent()).await.unwrap();

    let data = full_data::replace_all(pool, t.alice, &snapshot()).await.unwrap();

    assert_eq!(data.tasks.len(), 3);
    assert_eq!(data.tags.len(), 3);
    assert!(data.tags.iter().all(|tag| tag.user_id == t.alice && !tag.id.starts_with("stale")));
    assert!(data.tasks.iter().all(|t2| t2.task.user_id == t.alice && t2.task.id != "stale-task"));

    let (tasks, tags) = shape(&data);
    assert_eq!(tags, ["bills", "home", "outdoor"]);
    assert_eq!(
        tasks,
        vec![
            ("Clean gutters".to_string(), vec!["outdoor".to_string()]),
            (
                "Pay rent".to_string(),
                vec!["bills".to_string(), "home".to_string()]
            ),
            ("Sweep porch".to_string(), vec!["outdoor".to_string()]),
        ]
    );

    // the returned snapshot is what is stored
    assert_eq!(task::list_tasks(pool, t.alice).await.unwrap(), data.tasks);
    assert_eq!(tag::list_tags(pool, t.alice).await.unwrap(), data.tags);
}

#[tokio::test]
async fn test_replace_is_idempotent_up_to_ids() {
    let t = setup().await;
    let pool = &t.db.pool;

    let first = full_data::replace_all(pool, t.alice, &snapshot()).await.unwrap();
    let second = full_data::replace_all(pool, t.alice, &snapshot()).await.unwrap();

    assert_eq!(shape(&first), shape(&second));
    let first_ids: Vec<&str> = first.tags.iter().map(|t| t.id.as_str()).collect();
    assert!(second.tags.iter().all(|t| !first_ids.contains(&t.id.as_str())));
}

#[tokio::test]
async fn test_failed_replace_keeps_prior_data() {
    let t = setup().await;
    let pool = &t.db.pool;
    let before_task = task::create_task(pool, t.alice, &rent()).await.unwrap();
    let before_tags = tag::list_tags(pool, t.alice).await.unwrap();

    let bad: FullDataImport = serde_json::from_value(serde_json::json!({
        "tags": [{"name": "dup"}, {"name": "dup"}],
        "tasks": [{
            "name": "New", "duration": 1, "duration_unit": "day",
            "notification_option": "never", "tags": [{"name": "dup"}]
        }]
    }))
    .unwrap();
    let err = full_data::replace_all(pool, t.alice, &bad).await.unwrap_err();
    assert!(matches!(err, RepoError::UniqueViolation(_)));

    assert_eq!(task::list_tasks(pool, t.alice).await.unwrap(), vec![before_task]);
    assert_eq!(tag::list_tags(pool, t.alice).await.unwrap(), before_tags);
}

#[tokio::test]
async fn test_invalid_snapshot_is_rejected_before_writing() {
    let t = setup().await;
    let pool = &t.db.pool;
    task::create_task(pool, t.alice, &rent()).await.unwrap();

    let bad: FullDataImport = serde_json::from_value(serde_json::json!({
        "tasks": [{
            "name": "Too long", "duration": 1000, "duration_unit": "day",
            "notification_option": "never"
        }]
    }))
    .unwrap();
    let err = full_data::replace_all(pool, t.alice, &bad).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(task::list_tasks(pool, t.alice).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_replace_leaves_other_tenants_alone() {
    let t = setup().await;
    let pool = &t.db.pool;
    let mut bobs = rent();
    bobs.tags = Some(vec![TagSpec::new_named("bills")]);
    let bob_task = task::create_task(pool, t.bob, &bobs).await.unwrap();

    full_data::replace_all(pool, t.alice, &snapshot()).await.unwrap();
    full_data::replace_all(pool, t.alice, &FullDataImport::default())
        .await
        .unwrap();

    assert!(task::list_tasks(pool, t.alice).await.unwrap().is_empty());
    assert_eq!(task::list_tasks(pool, t.bob).await.unwrap(), vec![bob_task]);
}
