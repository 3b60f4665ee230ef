//! recur-server: per-user recurring tasks with tag associations
//!
//! - [`db`] - SQLite store: tenant guard, task/tag stores, relation
//!   synchronizer, completion engine, bulk replace, transaction manager
//! - [`api`] - thin axum HTTP surface
//! - [`auth`] - JWT tenant middleware
//! - [`config`] / [`state`] / [`utils`] - ambient plumbing

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod state;
pub mod utils;

pub use config::Config;
pub use state::AppState;
