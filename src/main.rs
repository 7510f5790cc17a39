//! Bank Transfer Service - Main Application Entry Point
//!
//! REST API server for bank accounts and inter-account fund transfers.
//! Transfers only execute on business days: weekends are rejected outright
//! and public holidays are looked up from an external feed through a
//! TTL-bounded, single-flight cache.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Business-day gate**: holiday feed + in-process cache
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool and run migrations
//! 3. Wire the holiday feed, business-day oracle, ledger, and engine
//! 4. Build HTTP router and start serving on the configured port

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;
mod validation;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::services::{
    business_day::{BrasilApiFeed, BusinessDayOracle},
    ledger::{Ledger, PgLedger},
    transfer_service::TransferEngine,
};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: db::DbPool,
    pub ledger: Arc<dyn Ledger>,
    pub engine: Arc<TransferEngine>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG, defaulting to "info".
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    // The oracle owns the holiday cache; it is constructed once here and
    // shared by reference for the life of the process.
    let feed = BrasilApiFeed::new(&config.holiday_feed_url)?;
    let oracle = Arc::new(BusinessDayOracle::new(Arc::new(feed)));

    let ledger: Arc<dyn Ledger> = Arc::new(PgLedger::new(pool.clone()));
    let engine = Arc::new(TransferEngine::new(Arc::clone(&ledger), oracle));

    let state = AppState {
        pool,
        ledger,
        engine,
    };

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/accounts", post(handlers::accounts::create_account))
        .route(
            "/api/v1/accounts/{id}",
            get(handlers::accounts::get_account),
        )
        .route(
            "/api/v1/transfers",
            post(handlers::transfers::create_transfer),
        )
        .route("/api/v1/statement", get(handlers::statement::get_statement))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
