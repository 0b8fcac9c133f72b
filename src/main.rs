//! Triage bot server binary.
//!
//! Loads configuration and the catalog, registers the Telegram webhook when a
//! public URL is configured, and serves the webhook until interrupted.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use triage_bot::adapters::http::{app_router, WebhookAppState};
use triage_bot::adapters::{
    InMemorySelectionStore, JsonCatalogLoader, TelegramBotApi, WebhookSecret,
};
use triage_bot::application::TriageDispatcher;
use triage_bot::config::AppConfig;
use triage_bot::ports::SelectionStore;

/// Upper bound on how long an expired session can linger.
const MAX_PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    init_tracing(&config);

    let catalog = Arc::new(
        JsonCatalogLoader::new(&config.catalog)
            .load()
            .await
            .context("loading triage catalog")?,
    );
    let limits = config.triage.limits()?;

    let store = Arc::new(InMemorySelectionStore::new());
    let dispatcher = Arc::new(TriageDispatcher::new(store.clone(), catalog.clone(), limits));
    let bot_api = Arc::new(TelegramBotApi::new(&config.telegram)?);

    if let Some(endpoint) = config.telegram.webhook_endpoint() {
        bot_api
            .set_webhook(&endpoint, config.telegram.webhook_secret.as_ref())
            .await
            .context("registering Telegram webhook")?;
    }

    if let Some(ttl) = config.triage.session_ttl() {
        spawn_session_purge(store.clone(), ttl)?;
    }

    let state = WebhookAppState::new(
        dispatcher,
        bot_api,
        catalog,
        WebhookSecret::new(config.telegram.webhook_secret.clone()),
    );
    let app = app_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "Starting triage bot");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Triage bot stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn spawn_session_purge(store: Arc<InMemorySelectionStore>, ttl: Duration) -> anyhow::Result<()> {
    let max_idle = chrono::Duration::from_std(ttl).context("session TTL out of range")?;
    let period = ttl.min(MAX_PURGE_INTERVAL);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match store.purge_idle(chrono::Utc::now() - max_idle).await {
                Ok(0) => {}
                Ok(purged) => tracing::info!(purged, "Idle selection sessions evicted"),
                Err(e) => tracing::error!(error = %e, "Session purge failed"),
            }
        }
    });

    tracing::info!(ttl_secs = ttl.as_secs(), "Idle session eviction enabled");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
