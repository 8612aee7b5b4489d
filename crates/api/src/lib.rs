//! # MentorBook API
//!
//! The API crate provides the web server for the MentorBook booking service.
//! It exposes slot queries, booking creation and status changes, and mentor
//! availability settings over HTTP.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Extract request data and call into the booking service
//! - **Middleware**: Error-to-HTTP mapping
//! - **Extract**: Path, query and body extractors that fail with `AppError`
//! - **Config**: Environment configuration
//!
//! Handlers never talk to the database directly. They go through
//! [`BookingService`], which is built from an injected store and clock.

/// Configuration module for API settings
pub mod config;
/// Extractors with JSON error rejections
pub mod extract;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::{Result, WrapErr};
use mentorbook_core::{clock::SystemClock, service::BookingService, store::BookingStore};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Booking operations over the configured store and clock
    pub service: BookingService,
}

/// Builds the application router with every route attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot queries and mentor availability settings
        .merge(routes::availability::routes())
        // Booking lifecycle
        .merge(routes::booking::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and store
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and booking settings
/// * `store` - Persistence backend for rules, blocked dates and bookings
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn BookingStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let service = BookingService::new(store, Arc::new(SystemClock), config.service_settings());
    let state = Arc::new(ApiState { service });

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<axum::http::HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS entry")?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request tracing and timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .layer(tower_http::timeout::TimeoutLayer::new(
                std::time::Duration::from_secs(config.request_timeout),
            )),
    );

    info!(
        "Bookings are created as {}",
        if config.auto_confirm { "confirmed" } else { "pending" }
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
