use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::{require_admin_middleware, session_auth_middleware};

/// Assemble the full application router. Exposed from the lib so integration
/// tests can drive it in-process.
pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/session", post(handlers::session::issue))
        // Session + admin gated API
        .merge(protected_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn protected_routes() -> Router {
    // Admin-gated routes: every listing and mutating operation sits behind
    // the allow-list predicate, recomputed per request
    let admin = Router::new()
        .merge(category_routes())
        .merge(product_routes())
        .route("/api/upload", post(handlers::upload::upload))
        .layer(middleware::from_fn(require_admin_middleware));

    // Session-only routes (identity management for the signed-in user)
    let session = Router::new()
        .route("/api/auth/whoami", get(handlers::session::whoami))
        .route("/api/auth/session/refresh", put(handlers::session::refresh))
        .route("/api/auth/session", delete(handlers::session::logout));

    // Session auth is the outer layer so it runs before the admin gate
    session
        .merge(admin)
        .layer(middleware::from_fn(session_auth_middleware))
}

fn category_routes() -> Router {
    use handlers::categories;

    Router::new()
        .route("/api/categories", get(categories::list).post(categories::create))
        .route(
            "/api/categories/:id",
            put(categories::update).delete(categories::delete),
        )
        .route("/api/categories/:id/properties", get(categories::properties))
}

fn product_routes() -> Router {
    use handlers::products;

    Router::new()
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/:id",
            get(products::get).put(products::update).delete(products::delete),
        )
        .route("/api/products/:id/form", get(products::form))
        .route("/api/products/:id/properties", patch(products::set_property))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Storefront Admin API",
            "version": version,
            "description": "E-commerce category/product admin backend",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "session": "/auth/session (public - token acquisition)",
                "auth": "/api/auth/* (session)",
                "categories": "/api/categories[/:id[/properties]] (admin)",
                "products": "/api/products[/:id[/form|/properties]] (admin)",
                "upload": "/api/upload (admin)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
