//! Shared types for the recurring-task service
//!
//! Domain models, the unified error system and small utilities used by the
//! server crate and by any client speaking its API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
