//! # Travel Agency Backend
//!
//! Non-UI logic for the travel agency management application.
//!
//! The backend follows a layered architecture:
//! - **rest** - thin HTTP surface; one domain call per request
//! - **domain** - use-case services and validation rules
//! - **storage** - SQLite persistence: repositories plus the
//!   coordinator that keeps each reservation and its invoice in sync
//!
//! The presentation layer only ever talks to the domain services through
//! the REST surface; it never reaches the store directly.

pub mod config;
pub mod domain;
pub mod rest;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::rest::AppState;
use crate::storage::DbConnection;

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database: {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain services");
    Ok(AppState::new(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the desktop frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/customers",
            get(rest::list_customers).post(rest::create_customer),
        )
        .route(
            "/customers/:id",
            get(rest::get_customer)
                .put(rest::update_customer)
                .delete(rest::delete_customer),
        )
        .route(
            "/reservations",
            get(rest::list_reservations).post(rest::create_reservation),
        )
        .route(
            "/reservations/:id",
            get(rest::get_reservation)
                .put(rest::update_reservation)
                .delete(rest::delete_reservation),
        )
        .route("/invoices", get(rest::list_invoices))
        .route(
            "/invoices/:id",
            get(rest::get_invoice)
                .put(rest::update_invoice)
                .delete(rest::delete_invoice),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
