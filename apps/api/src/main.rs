mod config;
mod db;
mod drafts;
mod errors;
mod extraction;
mod generation;
mod library;
mod llm_client;
mod models;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::{Config, DraftBackend};
use crate::db::create_pool;
use crate::drafts::{DraftStore, MemoryDraftStore, RedisDraftStore};
use crate::generation::generator::{ContentGenerator, FallbackGenerator, LlmGenerator};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scoring::HeuristicScorer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting IResume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize draft store
    let drafts: Arc<dyn DraftStore> = match config.draft_backend {
        DraftBackend::Redis => {
            let redis = redis::Client::open(config.redis_url.clone())?;
            info!("Draft store: redis");
            Arc::new(RedisDraftStore::new(redis))
        }
        DraftBackend::Memory => {
            warn!("Draft store: in-memory, drafts will not survive a restart");
            Arc::new(MemoryDraftStore::new())
        }
    };

    // Initialize generation (demo templates only when no API key is set)
    let primary: Option<Arc<dyn ContentGenerator>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmGenerator(llm)))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set, serving demo content only");
            None
        }
    };
    let generator = Arc::new(FallbackGenerator::new(primary));
    info!(
        "Generation backend: {}",
        generator.primary_backend().unwrap_or("demo")
    );

    // Build app state
    let state = AppState {
        db,
        s3,
        config: config.clone(),
        scorer: Arc::new(HeuristicScorer),
        generator,
        drafts,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the builder frontend

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "iresume-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
