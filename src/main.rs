//! Idea Intake server binary.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use idea_intake::adapters::ai::{OpenAIConfig, OpenAIProvider};
use idea_intake::adapters::http::{intake_app, IntakeAppState};
use idea_intake::adapters::notification::{ResendConfig, ResendNotifier};
use idea_intake::adapters::storage::InMemorySessionStore;
use idea_intake::application::OracleSettings;
use idea_intake::config::{AiConfig, AiProvider, AppConfig};
use idea_intake::domain::intake::{HandoffSettings, PhaseStateMachine};
use idea_intake::ports::AIProvider;

/// How often idle sessions are swept from the store.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    setup_logging(&config);

    let oracle = OpenAIProvider::new(oracle_config(&config.ai))?;
    let provider = oracle.provider_info();
    let notifier = ResendNotifier::new(ResendConfig::new(
        config.email.resend_api_key.clone(),
        config.email.from_header(),
    ))?;
    let store = InMemorySessionStore::new(config.server.max_sessions)
        .with_idle_ttl(config.server.session_ttl());
    spawn_session_sweeper(store.clone());
    let machine = PhaseStateMachine::new(HandoffSettings::new(
        config.email.team_recipient.clone(),
        config.email.subject_prefix.clone(),
    ));

    let state = IntakeAppState::new(
        Arc::new(store),
        Arc::new(oracle),
        Arc::new(notifier),
        machine,
    )
    .with_oracle_settings(OracleSettings {
        max_tokens: config.ai.max_tokens,
        temperature: config.ai.temperature,
    });

    let app = intake_app(
        state,
        &config.server.cors_origins_list(),
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        provider = %provider.name,
        model = %provider.model,
        max_context_tokens = provider.max_context_tokens,
        "Idea intake listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn setup_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn spawn_session_sweeper(store: InMemorySessionStore) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let evicted = store.evict_expired().await;
            if evicted > 0 {
                info!(evicted, "Swept idle sessions");
            }
        }
    });
}

fn oracle_config(ai: &AiConfig) -> OpenAIConfig {
    // Validation guarantees a key for OpenAI
    let mut oracle = match ai.provider {
        AiProvider::OpenAI => OpenAIConfig::openai(ai.api_key().unwrap_or_default()),
        AiProvider::Ollama => OpenAIConfig::ollama(),
    };
    if let Some(key) = ai.api_key() {
        oracle = oracle.with_api_key(key);
    }
    if let Some(base_url) = ai.base_url.as_deref().filter(|url| !url.is_empty()) {
        oracle = oracle.with_base_url(base_url);
    }

    oracle
        .with_model(ai.model.clone())
        .with_timeout(ai.timeout())
        .with_max_retries(ai.max_retries)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
