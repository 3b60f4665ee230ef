//! Authentication

pub mod tenant_auth;

pub use tenant_auth::{TenantContext, create_token, tenant_auth_middleware};
