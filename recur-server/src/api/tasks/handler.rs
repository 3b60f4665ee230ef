//! Task API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::error::AppResult;
use shared::models::{CompletionOutcome, TaskFull, TaskPayload};

use crate::api::extract::AppJson;
use crate::auth::TenantContext;
use crate::db::repository::{completion, task};
use crate::state::AppState;

/// GET /api/tasks
pub async fn list(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
) -> AppResult<Json<Vec<TaskFull>>> {
    let tasks = task::list_tasks(&state.pool, tenant.user_id).await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> AppResult<Json<TaskFull>> {
    let task = task::get_task(&state.pool, tenant.user_id, &id).await?;
    Ok(Json(task))
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    AppJson(payload): AppJson<TaskPayload>,
) -> AppResult<(StatusCode, Json<TaskFull>)> {
    let task = task::create_task(&state.pool, tenant.user_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<TaskPayload>,
) -> AppResult<Json<TaskFull>> {
    let task = task::update_task(&state.pool, tenant.user_id, &id, &payload).await?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    task::delete_task(&state.pool, tenant.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/tasks/{id}/complete
///
/// 201 with the successor when the task repeats, 204 otherwise.
pub async fn complete(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let outcome = completion::complete_task(&state.pool, tenant.user_id, &id).await?;
    Ok(match outcome {
        CompletionOutcome::Successor(next) => (StatusCode::CREATED, Json(next)).into_response(),
        CompletionOutcome::NoSuccessor => StatusCode::NO_CONTENT.into_response(),
    })
}
