use std::sync::Arc;

use anyhow::Context;
use chatbot_gateway::state::{AppState, SharedState};
use chatbot_gateway::{build_generator, config::AppConfig, routes, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    telemetry::init_tracing(&config.log_level);

    let generator = build_generator(&config);
    if config.warmup {
        generator
            .warm_up()
            .await
            .context("generator failed to warm up")?;
    }

    let state = Arc::new(AppState::new(
        generator,
        config.conversation_ttl,
        config.max_message_bytes,
    ));
    tokio::spawn(purge_conversations(state.clone()));

    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        model = %config.model,
        "chatbot gateway listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn purge_conversations(state: SharedState) {
    let mut ticker = tokio::time::interval(state.conversations.ttl());
    loop {
        ticker.tick().await;
        let removed = state.conversations.purge_expired().await;
        if removed > 0 {
            tracing::debug!(removed, "expired conversations purged");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
