//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Task and tag ids are server-assigned opaque strings; user ids are `i64`.

pub mod full_data;
pub mod tag;
pub mod task;
pub mod user;

// Re-exports
pub use full_data::*;
pub use tag::*;
pub use task::*;
pub use user::*;
