mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn root_returns_service_banner() -> Result<()> {
    let response = common::send("GET", "/", None, None).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Storefront Admin API");
    Ok(())
}

#[tokio::test]
async fn health_reports_degraded_without_database() -> Result<()> {
    let response = common::send("GET", "/health", None, None).await?;

    // OK when a database happens to be reachable, degraded otherwise; either
    // way the server answers
    assert!(
        response.status() == StatusCode::OK || response.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        response.status()
    );

    let body = common::body_json(response).await?;
    assert!(body["data"]["status"].is_string());
    Ok(())
}
