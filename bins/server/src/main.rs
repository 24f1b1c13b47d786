//! ERP API Server
//!
//! Main entry point for the sales, admin and HR dashboard service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use erp_api::{AppState, create_router};
use erp_db::connect;
use erp_shared::{AppConfig, JwtConfig, JwtService, NonceService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "erp=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = connect(&config.database).await?;

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: i64::try_from(config.jwt.access_token_expiry_secs / 60)
            .unwrap_or(i64::MAX),
    });
    let nonce_service = NonceService::new(&config.jwt.secret, config.nonce.lifetime_secs);
    info!(
        nonce_lifetime_secs = config.nonce.lifetime_secs,
        invoice_format = %config.accounting.invoice_format,
        "services configured"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        nonce_service: Arc::new(nonce_service),
        config: Arc::new(config),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
