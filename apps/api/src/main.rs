mod config;
mod document;
mod errors;
mod extract;
mod github;
mod job;
mod llm_client;
mod pipeline;
mod profile;
mod roadmap;
mod routes;
mod state;
mod store;
mod taxonomy;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::github::GithubClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::ArtifactStore;
use crate::taxonomy::SkillVocabulary;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("compass_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Load the skill vocabulary. This is the one component the pipeline
    // cannot run without, so a bad vocabulary file is fatal here.
    let vocabulary = match &config.vocabulary_path {
        Some(path) => SkillVocabulary::builtin_extended_from(path)?,
        None => SkillVocabulary::builtin(),
    };
    info!(
        "Skill vocabulary loaded ({} technical, {} soft)",
        vocabulary.technical().len(),
        vocabulary.soft().len()
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize source-hosting client
    let github = GithubClient::new(config.github_token.clone());
    if config.github_token.is_none() {
        info!("GITHUB_TOKEN not set; source-hosting calls run unauthenticated");
    }

    // Initialize artifact store
    let store = ArtifactStore::new(config.data_dir.clone());
    store.ensure_root().await?;
    info!("Artifact store rooted at {}", config.data_dir.display());

    // Build app state
    let state = AppState {
        oracle: Arc::new(llm),
        github,
        vocabulary: Arc::new(vocabulary),
        store,
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
