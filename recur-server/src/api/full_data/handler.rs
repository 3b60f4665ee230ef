//! Full-data API Handlers

use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
};
use shared::error::AppResult;
use shared::models::{FullData, FullDataImport};

use crate::api::extract::AppJson;
use crate::auth::TenantContext;
use crate::db::repository::full_data;
use crate::state::AppState;

/// POST /api/full-data - replace every task and tag of the caller
pub async fn replace(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    AppJson(snapshot): AppJson<FullDataImport>,
) -> AppResult<(StatusCode, Json<FullData>)> {
    let data = full_data::replace_all(&state.pool, tenant.user_id, &snapshot).await?;
    Ok((StatusCode::CREATED, Json(data)))
}
