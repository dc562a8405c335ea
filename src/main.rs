//! Server entry point: configuration, stores, background revocation-list
//! pruning, and the axum server itself.

use anyhow::{Context, Result};
use chrono::Utc;
use ricemill_backend::app::{build_router, AppState};
use ricemill_backend::auth::{AuthStore, TokenService, ACCESS_TOKEN_TTL_MINUTES};
use ricemill_backend::config::{load_env, Config};
use ricemill_backend::mill::MillStore;
use ricemill_backend::notify::Notifier;
use std::sync::Arc;
use std::time::Duration;
use tokio::{net::TcpListener, time::interval};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    let config = Config::from_env()?;
    info!("Starting rice-mill backend on port {}", config.port);

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .context("Failed to build HTTP client")?;

    let auth_store = Arc::new(AuthStore::new(&config.database_path)?);
    let mill_store = Arc::new(MillStore::new(&config.database_path)?);
    let token_service = Arc::new(TokenService::new(config.jwt_secret.clone()));
    let notifier = Notifier::new(http_client, config.notify_webhook_url.clone());

    info!("Stores initialized at: {}", config.database_path);

    // Revoked tokens past their natural expiry can never validate again, so
    // their rows are dead weight. Prune them in the background.
    tokio::spawn(revocation_pruning(
        auth_store.clone(),
        config.revocation_prune_secs,
    ));

    let state = AppState {
        auth: auth_store,
        mill: mill_store,
        tokens: token_service,
        notifier,
    };

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ricemill_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn revocation_pruning(store: Arc<AuthStore>, poll_secs: u64) {
    // Five extra minutes past the TTL so a token still inside any clock
    // wobble is never un-revoked early.
    const SAFETY_MARGIN_SECS: i64 = 300;

    let mut ticker = interval(Duration::from_secs(poll_secs));
    loop {
        ticker.tick().await;

        let cutoff = Utc::now().timestamp() - (ACCESS_TOKEN_TTL_MINUTES * 60 + SAFETY_MARGIN_SECS);
        match store.prune_revoked_before(cutoff) {
            Ok(0) => {}
            Ok(n) => info!("Pruned {} expired revocation entries", n),
            Err(e) => warn!("Revocation pruning failed: {}", e),
        }
    }
}
