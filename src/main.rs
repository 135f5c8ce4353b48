#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, SESSION_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = storefront_api::config::config();
    tracing::info!("Starting Storefront Admin API in {:?} mode", config.environment);

    let app = storefront_api::server::app();

    // Allow tests or deployments to override port via env (PORT is read into
    // config; keep the explicit override for parity with container platforms)
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Storefront Admin API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
