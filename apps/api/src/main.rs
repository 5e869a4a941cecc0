mod analysis;
mod config;
mod db;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod repository;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::init_db;
use crate::llm_client::{AnthropicClient, MODEL};
use crate::repository::postgres::{PgCvRepository, PgJobRepository, PgMatchRepository};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::S3FileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging; DEBUG=true overrides the default level
    let default_level = if config.debug {
        "debug".to_string()
    } else {
        config.rust_log.clone()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), default_level))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvmatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = init_db(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize LLM client
    let llm = AnthropicClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.ai_timeout_secs),
        config.ai_requests_per_minute,
    );
    info!("LLM client initialized (model: {MODEL})");

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        files: Arc::new(S3FileStore::new(s3, config.s3_bucket.clone())),
        cvs: Arc::new(PgCvRepository::new(db.clone())),
        jobs: Arc::new(PgJobRepository::new(db.clone())),
        matches: Arc::new(PgMatchRepository::new(db)),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

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
        "cvmatch-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
