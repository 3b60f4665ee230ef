//! Input validation helpers
//!
//! Runs before a transaction is opened so malformed input never reaches the
//! store. The schema's CHECK constraints enforce the same limits as a backstop.

use shared::models::{FullDataImport, TagSpec, TaskPayload};

use crate::db::repository::{RepoError, RepoResult};

// ── Limits ──────────────────────────────────────────────────────────

/// Task names, tag names, external subjects
pub const MAX_NAME_LEN: usize = 255;

pub const MIN_DURATION: i32 = 1;
pub const MAX_DURATION: i32 = 999;

// ── Helpers ─────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> RepoResult<()> {
    if value.trim().is_empty() {
        return Err(RepoError::Validation(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(RepoError::Validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

pub fn validate_duration(duration: i32) -> RepoResult<()> {
    if !(MIN_DURATION..=MAX_DURATION).contains(&duration) {
        return Err(RepoError::Validation(format!(
            "duration must be between {MIN_DURATION} and {MAX_DURATION}, got {duration}"
        )));
    }
    Ok(())
}

pub fn validate_tag_specs(specs: &[TagSpec]) -> RepoResult<()> {
    for spec in specs {
        match spec {
            TagSpec::Existing { id } => validate_required_text(id, "tag id", MAX_NAME_LEN)?,
            TagSpec::New { name } => validate_required_text(name, "tag name", MAX_NAME_LEN)?,
        }
    }
    Ok(())
}

// ── Payloads ────────────────────────────────────────────────────────

pub fn validate_task_payload(payload: &TaskPayload) -> RepoResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_duration(payload.duration)?;
    if let Some(specs) = &payload.tags {
        validate_tag_specs(specs)?;
    }
    Ok(())
}

pub fn validate_snapshot(snapshot: &FullDataImport) -> RepoResult<()> {
    for tag in &snapshot.tags {
        validate_required_text(&tag.name, "tag name", MAX_NAME_LEN)?;
    }
    for task in &snapshot.tasks {
        validate_required_text(&task.name, "name", MAX_NAME_LEN)?;
        validate_duration(task.duration)?;
        for tag in &task.tags {
            validate_required_text(&tag.name, "tag name", MAX_NAME_LEN)?;
        }
    }
    Ok(())
}
