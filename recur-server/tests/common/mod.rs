#![allow(dead_code)]

use chrono::NaiveDate;
use recur_server::db::DbService;
use recur_server::db::repository::user;
use shared::models::{DurationUnit, NotificationOption, TagSpec, TaskPayload};

pub const JWT_SECRET: &str = "test-secret";

/// Fresh in-memory database with two tenants
pub struct TestDb {
    pub db: DbService,
    pub alice: i64,
    pub bob: i64,
}

pub async fn setup() -> TestDb {
    let db = DbService::in_memory().await.expect("in-memory db");
    let alice = user::find_or_create_user(&db.pool, "alice").await.unwrap().id;
    let bob = user::find_or_create_user(&db.pool, "bob").await.unwrap().id;
    TestDb { db, alice, bob }
}

pub fn payload(name: &str) -> TaskPayload {
    TaskPayload {
        name: name.into(),
        duration: 1,
        duration_unit: DurationUnit::Month,
        start_date: None,
        repeating: false,
        notification_option: NotificationOption::Overdue,
        tags: None,
    }
}

pub fn rent() -> TaskPayload {
    TaskPayload {
        repeating: true,
        start_date: NaiveDate::from_ymd_opt(2020, 5, 1),
        tags: Some(vec![TagSpec::new_named("bills")]),
        ..payload("Pay rent")
    }
}
