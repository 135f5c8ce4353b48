use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims, Role};
use crate::config;
use crate::error::ApiError;

/// Authenticated session context extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
}

impl From<Claims> for AuthSession {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.sub,
            name: claims.name,
            role: claims.role,
        }
    }
}

/// Session middleware: validates the Bearer session token and injects the
/// session identity into request extensions
pub async fn session_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;
    let claims = auth::verify_session_token(&token)?;

    let session = AuthSession::from(claims);
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

/// Admin gate middleware: recomputes the admin predicate over the injected
/// session identity. The stored role claim is not trusted; the allow-list
/// loaded at process start is authoritative.
pub async fn require_admin_middleware(
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = request
        .extensions()
        .get::<AuthSession>()
        .ok_or_else(|| ApiError::unauthorized("Session authentication required"))?;

    if !auth::is_admin(&session.email, &config::config().security.admin_emails) {
        tracing::warn!("Admin gate refused {}", session.email);
        return Err(ApiError::forbidden(format!("Not an admin: {}", session.email)));
    }

    Ok(next.run(request).await)
}

/// Extract the token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty session token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcg=="));
        assert!(extract_bearer_token(&headers).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer  "));
        assert!(extract_bearer_token(&headers).is_err());
    }
}
