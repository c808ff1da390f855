//! # Shopdesk API
//!
//! The API crate provides the web server for the service-shop backend.
//! It exposes the service catalog, a day's bookable slots, and appointment
//! booking and status tracking.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into booking service calls
//! - **Middleware**: Map domain errors onto HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Storage is reached only through
//! the `AppointmentStore` trait, so the same router runs over PostgreSQL or
//! the in-memory store.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping between the domain and HTTP
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use shopdesk_core::{booking::BookingService, store::AppointmentStore};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Booking rules bound to the configured appointment store
    pub booking: BookingService,
}

impl ApiState {
    pub fn new(booking: BookingService) -> Arc<Self> {
        Arc::new(Self { booking })
    }
}

/// Installs the global tracing subscriber.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with every route attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Service catalog
        .merge(routes::service_types::routes())
        // Slot listing and appointment management
        .merge(routes::appointments::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server over the given appointment store
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and booking policy
/// * `store` - Record store holding the shop's appointments
///
/// # Errors
///
/// Fails if a CORS origin cannot be parsed, the address cannot be bound,
/// or the server stops with an I/O error.
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn AppointmentStore>) -> Result<()> {
    let booking = BookingService::new(store, config.date_policy);
    let app = build_router(ApiState::new(booking));

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<axum::http::HeaderValue>, _>>()?;
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PATCH,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(axum::error_handling::HandleErrorLayer::new(
                middleware::error_handling::handle_timeout,
            ))
            .timeout(std::time::Duration::from_secs(config.request_timeout))
            .into_inner(),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
