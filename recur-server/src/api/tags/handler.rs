//! Tag API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};
use shared::error::AppResult;
use shared::models::{Tag, TagCreate, TagUpdate};

use crate::api::extract::AppJson;
use crate::auth::TenantContext;
use crate::db::repository::tag;
use crate::state::AppState;

/// GET /api/tags
pub async fn list(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
) -> AppResult<Json<Vec<Tag>>> {
    let tags = tag::list_tags(&state.pool, tenant.user_id).await?;
    Ok(Json(tags))
}

/// GET /api/tags/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> AppResult<Json<Tag>> {
    let t = tag::get_tag(&state.pool, tenant.user_id, &id).await?;
    Ok(Json(t))
}

/// POST /api/tags
pub async fn create(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    AppJson(payload): AppJson<TagCreate>,
) -> AppResult<(StatusCode, Json<Tag>)> {
    let t = tag::create_tag(&state.pool, tenant.user_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(t)))
}

/// PUT /api/tags/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<TagUpdate>,
) -> AppResult<Json<Tag>> {
    let t = tag::update_tag(&state.pool, tenant.user_id, &id, &payload).await?;
    Ok(Json(t))
}

/// DELETE /api/tags/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    tag::delete_tag(&state.pool, tenant.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
