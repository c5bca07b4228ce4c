//! Roadmap boundary — packages the scorer's gap output for the external
//! LLM oracle and validates what comes back.
//!
//! The oracle is untrusted: its output is expected to be raw JSON but may
//! arrive fenced, truncated, or as prose. Malformed output is data here
//! (`Malformed { error, raw_output }`), not an exception — the pipeline
//! must never crash on a bad oracle response. Transport failures are
//! likewise carried as a variant so callers can return partial results.

pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::job::requirements::JobRequirements;
use crate::llm_client::{LlmClient, LlmError};
use crate::profile::models::UnifiedProfile;
use crate::roadmap::prompts::{
    GAP_ANALYSIS_PROMPT_TEMPLATE, GAP_ANALYSIS_SYSTEM, ROADMAP_PROMPT_TEMPLATE, ROADMAP_SYSTEM,
};

/// Fixed response when there is nothing to learn.
const NO_GAPS_MESSAGE: &str = "You already have all the required skills for this role!";

/// The oracle seam. `LlmClient` is the production implementation; tests
/// substitute canned responses.
#[async_trait]
pub trait GapOracle: Send + Sync {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl GapOracle for LlmClient {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        self.call_text(prompt, system).await
    }
}

/// Gap analysis as returned by the oracle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub validated_strengths: Vec<String>,
    pub critical_missing_skills: Vec<String>,
    pub skills_to_upgrade: Vec<String>,
}

impl GapAnalysis {
    /// Skills the roadmap should target: everything missing plus
    /// everything to upgrade, in that order.
    pub fn target_skills(&self) -> Vec<String> {
        self.critical_missing_skills
            .iter()
            .chain(self.skills_to_upgrade.iter())
            .cloned()
            .collect()
    }
}

/// One week of the learning plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: u32,
    pub theme: String,
    pub focus_skills: Vec<String>,
    pub actionable_task: String,
    pub resource_suggestion: String,
    pub vibe_check: String,
}

/// The 4-week learning plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapPlan {
    pub roadmap: Vec<WeekPlan>,
    pub adaptability_note: String,
}

/// Outcome of one oracle interaction. Never an error from the caller's
/// point of view; the pipeline degrades instead of aborting.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OracleOutcome<T> {
    Parsed(T),
    Malformed { error: String, raw_output: String },
    Failed { error: String },
}

impl<T> OracleOutcome<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }
}

/// Outcome of the roadmap stage, including the skip when there is
/// nothing to plan.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RoadmapOutcome {
    NoGaps { message: String },
    Plan(RoadmapPlan),
    Malformed { error: String, raw_output: String },
    Failed { error: String },
}

/// Asks the oracle to compare the candidate's verified skills against the
/// market requirements for the dream role.
pub async fn analyze_gaps(
    oracle: &dyn GapOracle,
    profile: &UnifiedProfile,
    market: &JobRequirements,
    dream_role: &str,
) -> OracleOutcome<GapAnalysis> {
    let current_role = if profile.current_role.is_empty() {
        "Unknown"
    } else {
        &profile.current_role
    };
    let prompt = GAP_ANALYSIS_PROMPT_TEMPLATE
        .replace("{current_role}", current_role)
        .replace("{dream_role}", dream_role)
        .replace("{technical_skills}", &profile.technical_skills.join(", "))
        .replace("{soft_skills}", &profile.soft_skills.join(", "))
        .replace("{market_skills}", &market.required_skills.join(", "));

    match oracle.complete(&prompt, GAP_ANALYSIS_SYSTEM).await {
        Ok(raw) => parse_oracle_json(&raw),
        Err(e) => {
            warn!("gap analysis oracle call failed: {e}");
            OracleOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// Asks the oracle for a 4-week plan covering the target skills. An empty
/// target list skips the call entirely.
pub async fn generate_roadmap(
    oracle: &dyn GapOracle,
    target_skills: &[String],
    time_commitment: &str,
) -> RoadmapOutcome {
    if target_skills.is_empty() {
        info!("no skill gaps; skipping roadmap oracle call");
        return RoadmapOutcome::NoGaps {
            message: NO_GAPS_MESSAGE.to_string(),
        };
    }

    let prompt = ROADMAP_PROMPT_TEMPLATE
        .replace("{target_skills}", &target_skills.join(", "))
        .replace("{time_commitment}", time_commitment);

    match oracle.complete(&prompt, ROADMAP_SYSTEM).await {
        Ok(raw) => match parse_oracle_json::<RoadmapPlan>(&raw) {
            OracleOutcome::Parsed(plan) => RoadmapOutcome::Plan(plan),
            OracleOutcome::Malformed { error, raw_output } => {
                RoadmapOutcome::Malformed { error, raw_output }
            }
            OracleOutcome::Failed { error } => RoadmapOutcome::Failed { error },
        },
        Err(e) => {
            warn!("roadmap oracle call failed: {e}");
            RoadmapOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// Parses fence-stripped oracle text, keeping the raw output on failure.
fn parse_oracle_json<T: serde::de::DeserializeOwned>(raw: &str) -> OracleOutcome<T> {
    let cleaned = crate::llm_client::strip_json_fences(raw);
    match serde_json::from_str(cleaned) {
        Ok(parsed) => OracleOutcome::Parsed(parsed),
        Err(e) => {
            warn!("oracle returned unparseable JSON: {e}");
            OracleOutcome::Malformed {
                error: format!("Failed to parse oracle JSON: {e}"),
                raw_output: raw.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Oracle that replays a fixed response.
    struct CannedOracle(Result<String, ()>);

    #[async_trait]
    impl GapOracle for CannedOracle {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(LlmError::EmptyContent),
            }
        }
    }

    fn market() -> JobRequirements {
        JobRequirements {
            title: "Data Scientist".to_string(),
            required_skills: vec!["Python".to_string(), "SQL".to_string()],
            critical_skills: vec!["Python".to_string()],
            years_required: 3,
            education_required: vec![],
            total_skills_required: 2,
        }
    }

    #[tokio::test]
    async fn test_gap_analysis_parses_clean_json() {
        let oracle = CannedOracle(Ok(r#"{
            "validated_strengths": ["Python"],
            "critical_missing_skills": ["SQL"],
            "skills_to_upgrade": ["Statistics"]
        }"#
        .to_string()));

        let outcome = analyze_gaps(
            &oracle,
            &UnifiedProfile::default(),
            &market(),
            "Data Scientist",
        )
        .await;
        match outcome {
            OracleOutcome::Parsed(gaps) => {
                assert_eq!(gaps.critical_missing_skills, vec!["SQL".to_string()]);
                assert_eq!(
                    gaps.target_skills(),
                    vec!["SQL".to_string(), "Statistics".to_string()]
                );
            }
            other => panic!("expected Parsed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_gap_analysis_strips_fences() {
        let oracle = CannedOracle(Ok(
            "```json\n{\"validated_strengths\": [], \"critical_missing_skills\": [\"SQL\"], \
             \"skills_to_upgrade\": []}\n```"
                .to_string(),
        ));

        let outcome = analyze_gaps(
            &oracle,
            &UnifiedProfile::default(),
            &market(),
            "Data Scientist",
        )
        .await;
        assert!(outcome.is_parsed());
    }

    #[tokio::test]
    async fn test_gap_analysis_malformed_keeps_raw_output() {
        let oracle = CannedOracle(Ok("not json".to_string()));

        let outcome = analyze_gaps(
            &oracle,
            &UnifiedProfile::default(),
            &market(),
            "Data Scientist",
        )
        .await;
        match outcome {
            OracleOutcome::Malformed { raw_output, error } => {
                assert_eq!(raw_output, "not json");
                assert!(!error.is_empty());
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_gap_analysis_transport_failure_is_captured() {
        let oracle = CannedOracle(Err(()));

        let outcome = analyze_gaps(
            &oracle,
            &UnifiedProfile::default(),
            &market(),
            "Data Scientist",
        )
        .await;
        assert!(matches!(outcome, OracleOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn test_roadmap_skips_oracle_when_no_gaps() {
        // The canned oracle would fail if called; the skip must win.
        let oracle = CannedOracle(Err(()));

        let outcome = generate_roadmap(&oracle, &[], "10 hours/week").await;
        match outcome {
            RoadmapOutcome::NoGaps { message } => {
                assert!(message.contains("already have"));
            }
            other => panic!("expected NoGaps, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_roadmap_parses_weekly_plan() {
        let oracle = CannedOracle(Ok(r#"{
            "roadmap": [
                {
                    "week": 1,
                    "theme": "SQL foundations",
                    "focus_skills": ["SQL"],
                    "actionable_task": "Model a schema and write 20 queries",
                    "resource_suggestion": "A practice database",
                    "vibe_check": "Explain a JOIN from memory"
                }
            ],
            "adaptability_note": "Repeat week 1 if the vibe check fails."
        }"#
        .to_string()));

        let target = vec!["SQL".to_string()];
        let outcome = generate_roadmap(&oracle, &target, "10 hours/week").await;
        match outcome {
            RoadmapOutcome::Plan(plan) => {
                assert_eq!(plan.roadmap.len(), 1);
                assert_eq!(plan.roadmap[0].week, 1);
                assert_eq!(plan.roadmap[0].focus_skills, vec!["SQL".to_string()]);
            }
            other => panic!("expected Plan, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_roadmap_malformed_does_not_panic() {
        let oracle = CannedOracle(Ok("```json\nstill not json\n```".to_string()));

        let target = vec!["SQL".to_string()];
        let outcome = generate_roadmap(&oracle, &target, "10 hours/week").await;
        match outcome {
            RoadmapOutcome::Malformed { raw_output, .. } => {
                assert!(raw_output.contains("still not json"));
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }
}
