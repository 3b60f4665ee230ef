//! User Model

use serde::{Deserialize, Serialize};

/// Tenant account, created lazily the first time an authenticated subject is seen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    /// Subject issued by the identity provider; unique and immutable
    pub external_subject: String,
}
