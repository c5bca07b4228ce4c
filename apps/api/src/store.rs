//! Durable JSON artifacts.
//!
//! Each analysis persists two documents under its own directory: the
//! unified profile and, when a dream job was supplied, the job-match
//! analysis. Both carry an explicit `schema_version` so future readers
//! can detect drift, and a generation timestamp.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::job::requirements::JobRequirements;
use crate::job::scoring::MatchResult;
use crate::profile::models::UnifiedProfile;

const SCHEMA_VERSION: u32 = 1;
const PROFILE_FILE: &str = "unified_profile.json";
const MATCH_FILE: &str = "job_match_analysis.json";

/// Envelope for the persisted unified profile.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredProfile {
    pub schema_version: u32,
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub profile: UnifiedProfile,
}

/// Envelope for the persisted job-match analysis.
#[derive(Debug, Serialize)]
pub struct StoredMatch<'a> {
    pub schema_version: u32,
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub job_requirements: &'a JobRequirements,
    pub match_analysis: &'a MatchResult,
}

/// File-backed artifact store rooted at `DATA_DIR`.
#[derive(Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the root directory. Called once at startup.
    pub async fn ensure_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("creating artifact root {}", self.root.display()))?;
        Ok(())
    }

    pub async fn save_profile(
        &self,
        analysis_id: Uuid,
        profile: &UnifiedProfile,
    ) -> Result<PathBuf> {
        let artifact = StoredProfile {
            schema_version: SCHEMA_VERSION,
            analysis_id,
            generated_at: Utc::now(),
            profile: profile.clone(),
        };
        let path = self.analysis_dir(analysis_id).join(PROFILE_FILE);
        self.write_json(&path, &artifact).await?;
        info!("unified profile saved: {}", path.display());
        Ok(path)
    }

    pub async fn save_match(
        &self,
        analysis_id: Uuid,
        job_requirements: &JobRequirements,
        match_analysis: &MatchResult,
    ) -> Result<PathBuf> {
        let artifact = StoredMatch {
            schema_version: SCHEMA_VERSION,
            analysis_id,
            generated_at: Utc::now(),
            job_requirements,
            match_analysis,
        };
        let path = self.analysis_dir(analysis_id).join(MATCH_FILE);
        self.write_json(&path, &artifact).await?;
        info!("job match analysis saved: {}", path.display());
        Ok(path)
    }

    /// Loads a previously persisted profile, None when the analysis id is
    /// unknown.
    pub async fn load_profile(&self, analysis_id: Uuid) -> Result<Option<StoredProfile>> {
        let path = self.analysis_dir(analysis_id).join(PROFILE_FILE);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };
        let stored: StoredProfile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(stored))
    }

    fn analysis_dir(&self, analysis_id: Uuid) -> PathBuf {
        self.root.join(analysis_id.to_string())
    }

    async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let body = serde_json::to_vec_pretty(value).context("serializing artifact")?;
        tokio::fs::write(path, body)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UnifiedProfile {
        UnifiedProfile {
            name: "Jane Morrison".to_string(),
            technical_skills: vec!["Python".to_string(), "SQL".to_string()],
            experience_years: 4,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let id = Uuid::new_v4();

        store.save_profile(id, &sample_profile()).await.unwrap();
        let loaded = store.load_profile(id).await.unwrap().unwrap();

        assert_eq!(loaded.schema_version, 1);
        assert_eq!(loaded.analysis_id, id);
        assert_eq!(loaded.profile.name, "Jane Morrison");
        assert_eq!(loaded.profile.technical_skills.len(), 2);
    }

    #[tokio::test]
    async fn test_load_unknown_id_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        assert!(store.load_profile(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_match_artifact_carries_schema_version() {
        use crate::job::scoring;

        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let id = Uuid::new_v4();

        let requirements = JobRequirements {
            title: "Data Scientist".to_string(),
            required_skills: vec!["Python".to_string()],
            critical_skills: vec!["Python".to_string()],
            years_required: 0,
            education_required: vec![],
            total_skills_required: 1,
        };
        let result = scoring::score(&sample_profile(), &requirements);

        let path = store.save_match(id, &requirements, &result).await.unwrap();
        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["match_analysis"]["overall_score"], 100.0);
    }
}
