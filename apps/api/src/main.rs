mod chat;
mod classification;
mod clock;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod prediction;
mod recommendation;
mod routes;
mod state;
mod store;
mod text;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::classification::{EmotionClassifier, LocalModelClassifier, RemoteClassifier};
use crate::clock::MonotonicClock;
use crate::config::{ClassifierBackend, Config};
use crate::db::create_pool;
use crate::llm_client::{GenerativeBackend, LlmClient};
use crate::recommendation::{RecommendationCatalog, RecommendationGenerator};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgRecordStore;
use crate::text::{FirstLineExtractor, ResponseExtractor};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Emotion API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize generative backend
    let timeout = Duration::from_secs(config.backend_timeout_secs);
    let llm: Arc<dyn GenerativeBackend> = Arc::new(LlmClient::new(
        config.api_url.clone(),
        config.api_key.clone(),
        timeout,
    )?);
    info!("LLM client initialized (timeout: {}s)", config.backend_timeout_secs);

    let extractor: Arc<dyn ResponseExtractor> = Arc::new(FirstLineExtractor);

    // Initialize classifier (artifacts for the local model load on first request)
    let classifier: Arc<dyn EmotionClassifier> = match (config.classifier_backend, &config.local_model) {
        (ClassifierBackend::Local, Some(local)) => {
            info!(
                "Classifier: local model ({}, {} labels)",
                local.model_location,
                local.labels.len()
            );
            let http = reqwest::Client::builder().timeout(timeout).build()?;
            Arc::new(LocalModelClassifier::new(local.clone(), http))
        }
        _ => {
            info!("Classifier: remote generative backend");
            Arc::new(RemoteClassifier::new(llm.clone(), extractor.clone()))
        }
    };

    let catalog = RecommendationCatalog::load(config.catalog_path.as_deref()).await?;

    // Build app state
    let state = AppState {
        store: Arc::new(PgRecordStore::new(db)),
        classifier,
        generator: Arc::new(RecommendationGenerator::new(llm.clone(), extractor)),
        catalog: Arc::new(catalog),
        llm,
        clock: Arc::new(MonotonicClock::new()),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
