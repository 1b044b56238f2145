//! RideTogether - Application Entry Point
//!
//! This is the main entry point for the RideTogether server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ridetogether::{
    config::CONFIG,
    constants::API_BASE_PATH,
    db,
    db::repositories::OtpRepository,
    handlers,
    mail::HttpMailer,
    middleware::logging_middleware,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RideTogether server...");

    // Initialize database connection pool; failure here is fatal
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Outgoing mail goes through the HTTP relay
    let mailer = Arc::new(HttpMailer::new(CONFIG.mail.clone()));

    // Periodic purge of expired OTP rows; expiry is independently checked
    // on every lookup, so this is hygiene rather than a security boundary
    let cleanup_pool = db_pool.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(600));
        loop {
            interval.tick().await;
            match OtpRepository::delete_expired(&cleanup_pool).await {
                Ok(0) => {}
                Ok(removed) => tracing::debug!(removed, "Expired OTP records purged"),
                Err(e) => tracing::warn!(error = ?e, "Expired OTP purge failed"),
            }
        }
    });

    // Create application state
    let state = AppState::new(db_pool, mailer, CONFIG.clone());

    // Build the router
    let app = Router::new()
        .nest(API_BASE_PATH, handlers::routes())
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
