//! Match scoring — weighted overlap between a unified profile and a set
//! of job requirements.
//!
//! Weights are fixed design constants: half the score is plain skill
//! overlap, 30% is overlap on the critical subset, 20% is experience
//! sufficiency. A `MatchResult` is derived data, immutable once computed;
//! a fresh profile/requirements pair produces a fresh result.

use std::collections::BTreeSet;

use serde::{Serialize, Serializer};

use crate::job::requirements::JobRequirements;
use crate::profile::models::UnifiedProfile;

const SKILLS_WEIGHT: f64 = 0.5;
const CRITICAL_WEIGHT: f64 = 0.3;
const EXPERIENCE_WEIGHT: f64 = 0.2;

/// Recommendation tier by overall score, inclusive on the lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// >= 80
    Excellent,
    /// >= 60
    Good,
    /// >= 40
    Fair,
    /// below 40
    Foundational,
}

impl Recommendation {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Fair
        } else {
            Self::Foundational
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent match - apply now",
            Self::Good => "Good match - close 2-3 skill gaps",
            Self::Fair => "Fair match - structured roadmap recommended",
            Self::Foundational => "Build foundational skills first",
        }
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// The scored comparison. All skill lists are lexicographically sorted
/// for determinism.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub overall_score: f64,
    pub skills_match_pct: f64,
    pub critical_skills_match_pct: f64,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub missing_critical_skills: Vec<String>,
    pub experience_match: bool,
    pub user_experience_years: u32,
    pub required_experience_years: u32,
    pub recommendation: Recommendation,
}

/// Scores a profile against job requirements.
pub fn score(profile: &UnifiedProfile, requirements: &JobRequirements) -> MatchResult {
    let user_skills: BTreeSet<&str> = profile
        .technical_skills
        .iter()
        .map(String::as_str)
        .collect();
    let required: BTreeSet<&str> = requirements
        .required_skills
        .iter()
        .map(String::as_str)
        .collect();
    let critical: BTreeSet<&str> = requirements
        .critical_skills
        .iter()
        .map(String::as_str)
        .collect();

    let matching: Vec<String> = required
        .intersection(&user_skills)
        .map(|s| s.to_string())
        .collect();
    let missing: Vec<String> = required
        .difference(&user_skills)
        .map(|s| s.to_string())
        .collect();
    let missing_critical: Vec<String> = critical
        .difference(&user_skills)
        .map(|s| s.to_string())
        .collect();

    let skills_match_pct = percentage(matching.len(), required.len());
    let critical_matching = critical.len() - missing_critical.len();
    let critical_skills_match_pct = percentage(critical_matching, critical.len());

    let experience_match = profile.experience_years >= requirements.years_required;

    let overall_score = round2(
        SKILLS_WEIGHT * skills_match_pct
            + CRITICAL_WEIGHT * critical_skills_match_pct
            + EXPERIENCE_WEIGHT * if experience_match { 100.0 } else { 0.0 },
    );

    MatchResult {
        overall_score,
        skills_match_pct: round2(skills_match_pct),
        critical_skills_match_pct: round2(critical_skills_match_pct),
        // BTreeSet iteration already yields lexicographic order.
        matching_skills: matching,
        missing_skills: missing,
        missing_critical_skills: missing_critical,
        experience_match,
        user_experience_years: profile.experience_years,
        required_experience_years: requirements.years_required,
        recommendation: Recommendation::from_score(overall_score),
    }
}

/// Defined as 0 when the denominator is 0, never NaN.
fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
