/// Today's date in UTC, used as the default start date of new occurrences
pub fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Generate a fresh opaque resource id.
///
/// Task and tag ids are always assigned here, never taken from a client
/// payload. v4 UUIDs stay collision-free under bulk inserts within the same
/// millisecond.
pub fn new_resource_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
