use axum::{extract::Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, AuthError, Claims, Role};
use crate::config;
use crate::middleware::{ApiResponse, ApiResult, AuthSession};

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    /// Identity assertion signed by the external identity provider
    pub assertion: String,
}

/// POST /auth/session - Exchange an identity assertion for a session token
///
/// The identity provider has already authenticated the user; this service
/// verifies the shared-secret signature, applies the admin allow-list, and
/// issues its own session token.
pub async fn issue(Json(payload): Json<SessionRequest>) -> ApiResult<Value> {
    let assertion = auth::verify_assertion(&payload.assertion)?;

    let allow_list = &config::config().security.admin_emails;
    if !auth::is_admin(&assertion.email, allow_list) {
        tracing::warn!("Session refused for {}", assertion.email);
        return Err(AuthError::AssertionRejected(assertion.email).into());
    }

    let role = Role::for_email(&assertion.email, allow_list);
    let claims = Claims::new(assertion.email, assertion.name, role);
    let token = auth::issue_session_token(&claims)?;

    Ok(ApiResponse::created(json!({
        "token": token,
        "email": claims.sub,
        "name": claims.name,
        "role": claims.role,
        "expires_at": claims.exp,
    })))
}

/// GET /api/auth/whoami - Current session identity and role
pub async fn whoami(Extension(session): Extension<AuthSession>) -> ApiResult<Value> {
    let is_admin = auth::is_admin(&session.email, &config::config().security.admin_emails);

    Ok(ApiResponse::success(json!({
        "email": session.email,
        "name": session.name,
        "role": session.role,
        "is_admin": is_admin,
    })))
}

/// PUT /api/auth/session/refresh - Re-issue the session token with a fresh expiry
pub async fn refresh(Extension(session): Extension<AuthSession>) -> ApiResult<Value> {
    // Role is recomputed so an allow-list change takes effect at refresh
    let role = Role::for_email(&session.email, &config::config().security.admin_emails);
    let claims = Claims::new(session.email, session.name, role);
    let token = auth::issue_session_token(&claims)?;

    Ok(ApiResponse::success(json!({
        "token": token,
        "email": claims.sub,
        "role": claims.role,
        "expires_at": claims.exp,
    })))
}

/// DELETE /api/auth/session - Logout acknowledgement
///
/// Sessions are stateless; the client discards the token.
pub async fn logout(Extension(session): Extension<AuthSession>) -> ApiResult<Value> {
    tracing::debug!("Session logout for {}", session.email);
    Ok(ApiResponse::success(json!({ "logged_out": true })))
}
