use std::sync::Arc;

use crate::config::Config;
use crate::github::GithubClient;
use crate::roadmap::GapOracle;
use crate::store::ArtifactStore;
use crate::taxonomy::SkillVocabulary;

/// Shared application state injected into all route handlers via Axum
/// extractors. Everything here is read-only after startup; per-request
/// working state lives in the pipeline run.
#[derive(Clone)]
pub struct AppState {
    /// The LLM oracle seam. Default: `LlmClient`. Tests substitute a
    /// canned implementation.
    pub oracle: Arc<dyn GapOracle>,
    pub github: GithubClient,
    /// Immutable skill vocabulary, loaded once at startup.
    pub vocabulary: Arc<SkillVocabulary>,
    pub store: ArtifactStore,
    /// Runtime settings. Consumed at startup; kept here for handlers
    /// that grow configuration needs.
    #[allow(dead_code)]
    pub config: Config,
}
