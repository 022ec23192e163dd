use std::sync::Arc;

use fest_admin_api::api::{self, AppState};
use fest_admin_api::config::Config;
use fest_admin_api::infrastructure::repositories::PostgresRegistrationRepository;
use fest_admin_api::infrastructure::StoreConnector;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    // One connector per process; repositories reconnect through it lazily
    let store = Arc::new(StoreConnector::from_config(&config));
    if let Err(e) = store.connect().await {
        tracing::warn!("Registration store unavailable at startup: {}", e);
    }

    let registrations = PostgresRegistrationRepository::new(store);
    let state = AppState::new(Arc::new(registrations));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
