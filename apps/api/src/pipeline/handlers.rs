//! Axum route handlers for the analysis pipeline.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::document;
use crate::errors::AppError;
use crate::job::requirements::{extract_requirements, JobRequirements};
use crate::job::scoring::{score, MatchResult};
use crate::pipeline::{run_analysis, AnalysisReport, AnalyzeInputs};
use crate::profile::models::UnifiedProfile;
use crate::roadmap::{analyze_gaps, generate_roadmap, GapAnalysis, OracleOutcome, RoadmapOutcome};
use crate::state::AppState;
use crate::store::StoredProfile;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Either an inline profile or a reference to a persisted one.
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub profile: Option<UnifiedProfile>,
    pub analysis_id: Option<Uuid>,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub job_requirements: JobRequirements,
    pub match_analysis: MatchResult,
}

#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    pub dream_role: String,
    #[serde(default)]
    pub time_commitment: String,
    pub user_profile: UnifiedProfile,
}

#[derive(Debug, Serialize)]
pub struct RoadmapResponse {
    pub status: String,
    pub market_requirements: JobRequirements,
    pub gap_analysis: OracleOutcome<GapAnalysis>,
    pub roadmap_plan: RoadmapOutcome,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Full pipeline over raw text inputs. At least one source must be
/// provided; a dream job additionally triggers the match stage.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(inputs): Json<AnalyzeInputs>,
) -> Result<Json<AnalysisReport>, AppError> {
    if !inputs.has_any_source() {
        return Err(AppError::Validation(
            "at least one of resume_text, github_username, linkedin_text is required".to_string(),
        ));
    }

    let report = run_analysis(inputs, &state.vocabulary, &state.github, &state.store).await?;
    Ok(Json(report))
}

/// POST /api/v1/analyze/upload
///
/// Multipart variant of the pipeline: `resume` and `linkedin` are PDF
/// files, `github_username` and `dream_job` are text fields. A PDF that
/// cannot be read is treated as a missing source, not a request error.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut inputs = AnalyzeInputs::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("reading resume upload: {e}")))?;
                inputs.resume_text = document::extract_pdf_text(&bytes);
            }
            "linkedin" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("reading linkedin upload: {e}")))?;
                inputs.linkedin_text = document::extract_pdf_text(&bytes);
            }
            "github_username" => {
                inputs.github_username = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("reading github_username field: {e}"))
                })?);
            }
            "dream_job" => {
                inputs.dream_job = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("reading dream_job field: {e}")))?,
                );
            }
            other => {
                info!("ignoring unknown multipart field '{other}'");
            }
        }
    }

    if !inputs.has_any_source() {
        return Err(AppError::Validation(
            "no usable source in upload: provide resume, linkedin or github_username".to_string(),
        ));
    }

    let report = run_analysis(inputs, &state.vocabulary, &state.github, &state.store).await?;
    Ok(Json(report))
}

/// POST /api/v1/match
///
/// Recomputes job requirements and the match score for an inline or
/// persisted profile. Nothing is cached; a fresh pair produces a fresh
/// result.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let profile = match (request.profile, request.analysis_id) {
        (Some(profile), _) => profile,
        (None, Some(analysis_id)) => state
            .store
            .load_profile(analysis_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Analysis {analysis_id} not found")))?
            .profile,
        (None, None) => {
            return Err(AppError::Validation(
                "either profile or analysis_id is required".to_string(),
            ))
        }
    };

    let job_requirements = extract_requirements(&request.job_description, &state.vocabulary);
    let match_analysis = score(&profile, &job_requirements);

    Ok(Json(MatchResponse {
        job_requirements,
        match_analysis,
    }))
}

/// GET /api/v1/profile/:analysis_id
///
/// Returns the persisted unified profile for a past analysis run.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(analysis_id): Path<Uuid>,
) -> Result<Json<StoredProfile>, AppError> {
    let stored = state
        .store
        .load_profile(analysis_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {analysis_id} not found")))?;
    Ok(Json(stored))
}

/// POST /api/v1/roadmap
///
/// Market requirements for the dream role, then the two oracle stages:
/// gap analysis and the 4-week plan. Oracle failures degrade the
/// response to "partial" instead of failing the request.
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Json(request): Json<RoadmapRequest>,
) -> Result<Json<RoadmapResponse>, AppError> {
    if request.dream_role.trim().is_empty() {
        return Err(AppError::Validation("dream_role cannot be empty".to_string()));
    }
    let time_commitment = if request.time_commitment.trim().is_empty() {
        "10 hours/week"
    } else {
        request.time_commitment.trim()
    };

    let market_requirements = extract_requirements(&request.dream_role, &state.vocabulary);

    let gap_analysis = analyze_gaps(
        state.oracle.as_ref(),
        &request.user_profile,
        &market_requirements,
        &request.dream_role,
    )
    .await;

    let roadmap_plan = match &gap_analysis {
        OracleOutcome::Parsed(gaps) => {
            generate_roadmap(state.oracle.as_ref(), &gaps.target_skills(), time_commitment).await
        }
        _ => RoadmapOutcome::Failed {
            error: "gap analysis unavailable; roadmap skipped".to_string(),
        },
    };

    let status = if gap_analysis.is_parsed()
        && matches!(
            roadmap_plan,
            RoadmapOutcome::Plan(_) | RoadmapOutcome::NoGaps { .. }
        ) {
        "success"
    } else {
        "partial"
    };

    Ok(Json(RoadmapResponse {
        status: status.to_string(),
        market_requirements,
        gap_analysis,
        roadmap_plan,
    }))
}
