//! Tenant JWT authentication
//!
//! The bearer token's `sub` is the subject issued by the identity provider.
//! It is resolved to a local user (created on first sight) and handed to the
//! handlers as a [`TenantContext`] extension.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use crate::db::repository::user;
use crate::state::AppState;

/// JWT claims for tenant authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct TenantClaims {
    /// External subject
    pub sub: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated tenant resolved from the token
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub user_id: i64,
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT token for an external subject
pub fn create_token(subject: &str, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = TenantClaims {
        sub: subject.to_string(),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token and return its claims
pub fn verify_token(token: &str, secret: &str) -> Result<TenantClaims, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    jsonwebtoken::decode::<TenantClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::new(ErrorCode::TokenExpired),
            _ => AppError::invalid_token("Invalid or expired token"),
        }
    })
}

/// Middleware that verifies the bearer token and attaches the tenant
pub async fn tenant_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(AppError::not_authenticated)?;

    let claims = verify_token(token, &state.jwt_secret)?;
    let user = user::find_or_create_user(&state.pool, &claims.sub).await?;

    request
        .extensions_mut()
        .insert(TenantContext { user_id: user.id });

    Ok(next.run(request).await)
}
