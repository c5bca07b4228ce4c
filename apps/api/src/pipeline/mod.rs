//! Pipeline orchestration.
//!
//! One request, one batch run: parse each provided source into a
//! `SourceProfile`, merge, persist, and (when a dream job was supplied)
//! extract requirements and score the match. All working state is local
//! to the run; only the vocabulary and the clients are shared, read-only.

pub mod handlers;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{linkedin, resume};
use crate::github::GithubClient;
use crate::job::requirements::{extract_requirements, JobRequirements};
use crate::job::scoring::{score, MatchResult};
use crate::profile::merge::merge_profiles;
use crate::profile::models::{SourceProfile, UnifiedProfile};
use crate::store::ArtifactStore;
use crate::taxonomy::SkillVocabulary;

/// Upper bound on the whole source-hosting stage (several API calls).
const GITHUB_STAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw inputs for one analysis run. Every field is optional; a missing
/// source becomes an empty profile.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeInputs {
    pub resume_text: Option<String>,
    pub github_username: Option<String>,
    pub linkedin_text: Option<String>,
    pub dream_job: Option<String>,
}

impl AnalyzeInputs {
    pub fn has_any_source(&self) -> bool {
        [
            self.resume_text.as_deref(),
            self.github_username.as_deref(),
            self.linkedin_text.as_deref(),
        ]
        .iter()
        .any(|input| input.is_some_and(|value| !value.trim().is_empty()))
    }
}

/// What happened to one input source. "Missing" and "Failed" are
/// distinct on purpose: callers can tell "no data" from "call failed".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum SourceStatus {
    Parsed,
    Missing,
    Failed(String),
}

#[derive(Debug, Serialize)]
pub struct SourceReport {
    pub resume: SourceStatus,
    pub github: SourceStatus,
    pub linkedin: SourceStatus,
}

#[derive(Debug, Serialize)]
pub struct JobMatchReport {
    pub job_requirements: JobRequirements,
    pub match_analysis: MatchResult,
}

/// Full result of one pipeline run.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub profile: UnifiedProfile,
    pub sources: SourceReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_match: Option<JobMatchReport>,
}

/// Runs the full pipeline over the provided inputs and persists the
/// durable artifacts.
pub async fn run_analysis(
    inputs: AnalyzeInputs,
    vocabulary: &SkillVocabulary,
    github: &GithubClient,
    store: &ArtifactStore,
) -> Result<AnalysisReport, AppError> {
    let analysis_id = Uuid::new_v4();
    info!(%analysis_id, "starting analysis run");

    let (resume_profile, resume_status) = match non_empty(inputs.resume_text.as_deref()) {
        Some(text) => {
            let profile = resume::parse_resume_text(text, vocabulary);
            (profile, SourceStatus::Parsed)
        }
        None => (SourceProfile::default(), SourceStatus::Missing),
    };

    let (github_profile, github_status) = match non_empty(inputs.github_username.as_deref()) {
        Some(username) => {
            match tokio::time::timeout(
                GITHUB_STAGE_TIMEOUT,
                github.analyze_profile(username, vocabulary),
            )
            .await
            {
                Ok(Ok(profile)) => (profile, SourceStatus::Parsed),
                Ok(Err(e)) => {
                    warn!("source-hosting analysis failed for {username}: {e}");
                    (SourceProfile::default(), SourceStatus::Failed(e.to_string()))
                }
                Err(_) => {
                    warn!("source-hosting analysis timed out for {username}");
                    (
                        SourceProfile::default(),
                        SourceStatus::Failed("timed out".to_string()),
                    )
                }
            }
        }
        None => (SourceProfile::default(), SourceStatus::Missing),
    };

    let (linkedin_profile, linkedin_status) = match non_empty(inputs.linkedin_text.as_deref()) {
        Some(text) => {
            let profile = linkedin::parse_linkedin_text(text, vocabulary);
            (profile, SourceStatus::Parsed)
        }
        None => (SourceProfile::default(), SourceStatus::Missing),
    };

    let profile = merge_profiles(&resume_profile, &github_profile, &linkedin_profile);
    store
        .save_profile(analysis_id, &profile)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let job_match = match non_empty(inputs.dream_job.as_deref()) {
        Some(job_text) => {
            let job_requirements = extract_requirements(job_text, vocabulary);
            let match_analysis = score(&profile, &job_requirements);
            store
                .save_match(analysis_id, &job_requirements, &match_analysis)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;
            Some(JobMatchReport {
                job_requirements,
                match_analysis,
            })
        }
        None => None,
    };

    info!(
        %analysis_id,
        skills = profile.technical_skills.len(),
        matched = job_match.is_some(),
        "analysis run complete"
    );

    Ok(AnalysisReport {
        analysis_id,
        profile,
        sources: SourceReport {
            resume: resume_status,
            github: github_status,
            linkedin: linkedin_status,
        },
        job_match,
    })
}

fn non_empty(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|value| !value.is_empty())
}
