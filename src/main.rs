//! Scaffold Backend Server
//! Mission: Turn free-text ideas into persisted project scaffolds with CRUD
//! on their per-model records

use anyhow::{Context, Result};
use axum::middleware;
use dotenv::dotenv;
use scaffold_backend::{
    api::{self, AppState},
    auth::JwtHandler,
    config::Config,
    middleware::{rate_limit_middleware, request_logging, RateLimitLayer},
    store::{ProjectStore, UserStore},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    // Fail fast: no partial startup without config or a reachable store.
    let config = Config::from_env()?;

    let projects = Arc::new(
        ProjectStore::new(&config.database_path).context("Failed to open project store")?,
    );
    let users =
        Arc::new(UserStore::new(&config.database_path).context("Failed to open user store")?);
    let jwt = Arc::new(JwtHandler::new(config.jwt_secret.clone()));

    info!("💾 Stores initialized at: {}", config.database_path);

    let state = AppState {
        projects,
        users,
        jwt,
    };

    let limiter = RateLimitLayer::new(config.rate_limit.clone());

    // Periodic sweep of stale rate-limit windows.
    let sweep = limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            sweep.cleanup();
        }
    });

    let app = api::router(state)
        .layer(middleware::from_fn(request_logging))
        .layer(middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        ))
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🚀 Scaffold backend listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scaffold_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
