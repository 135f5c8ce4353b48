use std::sync::OnceLock;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const OTHER_EMAIL: &str = "visitor@example.com";
pub const IDENTITY_SECRET: &str = "test-identity-secret";

static ENV: OnceLock<()> = OnceLock::new();

/// Pin the test environment before the config singleton is first read.
/// No DATABASE_URL is set: the suite runs hermetically against the
/// in-process router and asserts everything that does not need a store.
fn init_env() {
    ENV.get_or_init(|| {
        std::env::set_var("APP_ENV", "development");
        std::env::set_var("SESSION_SECRET", "test-session-secret");
        std::env::set_var("IDENTITY_SECRET", IDENTITY_SECRET);
        std::env::set_var("ADMIN_EMAILS", ADMIN_EMAIL);
        // Media host configured but never contacted by these tests
        std::env::set_var("MEDIA_BASE_URL", "http://127.0.0.1:9");
        std::env::set_var("MEDIA_API_KEY", "test-key");
        std::env::remove_var("DATABASE_URL");
    });
}

pub fn app() -> Router {
    init_env();
    storefront_api::server::app()
}

/// Session token for the allow-listed admin
pub fn admin_token() -> String {
    init_env();
    let claims = storefront_api::auth::Claims::new(
        ADMIN_EMAIL.to_string(),
        Some("Admin".to_string()),
        storefront_api::auth::Role::Admin,
    );
    storefront_api::auth::issue_session_token(&claims).expect("token")
}

/// Valid session token for an email outside the allow-list
pub fn non_admin_token() -> String {
    init_env();
    let claims = storefront_api::auth::Claims::new(
        OTHER_EMAIL.to_string(),
        None,
        storefront_api::auth::Role::Unauthorized,
    );
    storefront_api::auth::issue_session_token(&claims).expect("token")
}

/// Drive one request through the router in-process
pub async fn send(
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<Response<Body>> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    Ok(app().oneshot(request).await?)
}

pub async fn body_json(response: Response<Body>) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}
