//! Profile data model.
//!
//! Explicit tagged records instead of open maps: absence vs. empty is
//! visible in the types, and schema drift fails at compile time. A source
//! that yielded no usable text produces `SourceProfile::default()` (the
//! empty profile), never a null — downstream merging treats absence
//! uniformly.

use serde::{Deserialize, Serialize};

/// One education credential. Fields are empty strings when unknown; the
/// all-"N/A" placeholder marks "no education data found" and must not be
/// read as a literal degree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub year: String,
}

impl EducationEntry {
    pub fn placeholder() -> Self {
        Self {
            degree: "N/A".to_string(),
            field: "N/A".to_string(),
            institution: "N/A".to_string(),
            year: "N/A".to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.degree == "N/A" && self.field == "N/A"
    }
}

/// Share of one programming language in a source-hosting account,
/// percentage of total bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub percent: f64,
}

/// A repository summarized for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u32,
    pub url: String,
}

/// Activity counters from the source-hosting account, kept on the
/// unified profile for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubActivity {
    pub username: String,
    pub profile_url: String,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub total_commits: u32,
    pub total_stars: u32,
    pub total_forks: u32,
    /// Top languages by byte share, descending.
    pub languages: Vec<LanguageShare>,
    pub top_repositories: Vec<RepoSummary>,
}

/// LinkedIn-specific extras that survive into the unified profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkedInDetails {
    pub headline: String,
    pub location: String,
    pub current_role: String,
    pub current_company: String,
    /// Raw duration string of the current position, e.g. "Jan 2020 - Present".
    pub duration: String,
    pub certifications: Vec<String>,
}

/// Structured extraction result for a single input source. Identity
/// fields are empty when not extracted; "Unknown" names are treated as
/// absent by the merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub experience_years: u32,
    pub education: Vec<EducationEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubActivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<LinkedInDetails>,
}

impl SourceProfile {
    /// True when the source yielded nothing usable at all.
    pub fn is_empty(&self) -> bool {
        (self.name.is_empty() || self.name == "Unknown")
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.technical_skills.is_empty()
            && self.soft_skills.is_empty()
            && self.experience_years == 0
            && self.education.iter().all(EducationEntry::is_placeholder)
            && self.github.is_none()
            && self.linkedin.is_none()
    }
}

/// Which sources contributed data to a unified profile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DataSources {
    pub resume: bool,
    pub github: bool,
    pub linkedin: bool,
}

/// The merged candidate representation combining all available sources.
/// Created once per pipeline run, persisted as the durable artifact, and
/// never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnifiedProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub headline: String,
    pub current_role: String,
    pub current_company: String,
    /// Union across all sources, lexicographically sorted.
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub experience_years: u32,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubActivity>,
    pub data_sources: DataSources,
}
