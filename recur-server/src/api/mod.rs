//! API routes
//!
//! - [`extract`] - request extractors
//! - [`health`] - public health check
//! - [`tasks`] - task CRUD and completion
//! - [`tags`] - tag CRUD
//! - [`full_data`] - bulk replace of a tenant's data

pub mod extract;
pub mod full_data;
pub mod health;
pub mod tags;
pub mod tasks;

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::routing::get;
use axum::{BoxError, Router, middleware};
use http::{HeaderName, HeaderValue};
use shared::error::{AppError, ErrorCode};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::tenant_auth_middleware;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::new(ErrorCode::TimeoutError)
    } else {
        AppError::internal(err.to_string())
    }
}

/// Tenant routes, all behind the JWT middleware
fn tenant_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(tasks::router())
        .merge(tags::router())
        .merge(full_data::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            tenant_auth_middleware,
        ))
}

/// Build the application router with middleware and state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(tenant_router(&state))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    HeaderName::from_static(REQUEST_ID_HEADER),
                    XRequestId,
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID_HEADER,
                )))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(REQUEST_TIMEOUT),
        )
        .with_state(state)
}
