// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod responses;
pub mod state;

use axum::{routing::get, Router};

use handlers::{events, health, registrations};

pub use state::AppState;

/// Builds the application router without transport middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Event catalog
        .route("/events", get(events::list_events))
        // Registration routes
        .route(
            "/registrations",
            get(registrations::list_registrations)
                .put(registrations::update_registration)
                .delete(registrations::delete_registration),
        )
        .route("/registrations/export", get(registrations::export_report))
        // Shared state
        .with_state(state)
}
