//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;
mod rate_limit;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::SeedSuperAdminUseCase;
use store::StoreBackend;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,leads=info,testimonials=info,analytics=info,audit=info,store=info,platform=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    let store = Arc::new(StoreBackend::connect(&config.store).await?);
    tracing::info!(backend = store.name(), "Store ready");

    // Seed the first super admin on an empty user collection
    match SeedSuperAdminUseCase::new(store.clone(), Arc::new(config.auth.clone()))
        .execute()
        .await
    {
        Ok(Some(user)) => tracing::info!(username = %user.username, "Seeded super admin"),
        Ok(None) => tracing::debug!("Super admin already present"),
        Err(e) => tracing::warn!(error = %e, "Super admin seeding failed, continuing anyway"),
    }

    let app = app::build_router(store, &config);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(trust_proxy = config.trust_proxy, "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
