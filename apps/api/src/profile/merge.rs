//! Profile merging — reconciles the per-source profiles into one
//! `UnifiedProfile` under fixed priority rules.
//!
//! Union-based fields are monotonic: adding a source can only add skills
//! or raise the experience estimate, never remove anything. Missing
//! sources arrive as empty profiles and fall through every rule.

use std::collections::BTreeSet;

use crate::profile::models::{DataSources, EducationEntry, SourceProfile, UnifiedProfile};

/// Merges the three source profiles. Order-independent except for the
/// documented priority lists (name: LinkedIn > resume > GitHub; education:
/// LinkedIn > resume).
pub fn merge_profiles(
    resume: &SourceProfile,
    github: &SourceProfile,
    linkedin: &SourceProfile,
) -> UnifiedProfile {
    let linkedin_details = linkedin.linkedin.clone().unwrap_or_default();

    UnifiedProfile {
        name: pick_name(&[linkedin, resume, github]),
        email: pick_field(&[&resume.email, &linkedin.email, &github.email]),
        phone: pick_field(&[&resume.phone, &linkedin.phone, &github.phone]),
        location: pick_field(&[&linkedin.location, &github.location, &resume.location]),
        headline: linkedin_details.headline,
        current_role: linkedin_details.current_role,
        current_company: linkedin_details.current_company,
        technical_skills: union_sorted(&[
            &resume.technical_skills,
            &github.technical_skills,
            &linkedin.technical_skills,
        ]),
        soft_skills: union_sorted(&[
            &resume.soft_skills,
            &github.soft_skills,
            &linkedin.soft_skills,
        ]),
        experience_years: resume
            .experience_years
            .max(github.experience_years)
            .max(linkedin.experience_years),
        education: pick_education(linkedin, resume),
        certifications: linkedin_details.certifications,
        github: github.github.clone(),
        data_sources: DataSources {
            resume: !resume.is_empty(),
            github: !github.is_empty(),
            linkedin: !linkedin.is_empty(),
        },
    }
}

/// First usable name by priority; "Unknown" counts as absent.
fn pick_name(priority: &[&SourceProfile]) -> String {
    priority
        .iter()
        .map(|p| p.name.trim())
        .find(|name| !name.is_empty() && *name != "Unknown")
        .map(String::from)
        .unwrap_or_else(|| "Unknown".to_string())
}

fn pick_field(priority: &[&String]) -> String {
    priority
        .iter()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(String::from)
        .unwrap_or_default()
}

fn union_sorted(sets: &[&Vec<String>]) -> Vec<String> {
    let union: BTreeSet<&String> = sets.iter().flat_map(|set| set.iter()).collect();
    union.into_iter().cloned().collect()
}

/// LinkedIn's education list wins when it carries real entries; the
/// placeholder sentinel does not count as data.
fn pick_education(linkedin: &SourceProfile, resume: &SourceProfile) -> Vec<EducationEntry> {
    let usable = |entries: &[EducationEntry]| {
        !entries.is_empty() && !entries.iter().all(EducationEntry::is_placeholder)
    };
    if usable(&linkedin.education) {
        linkedin.education.clone()
    } else if usable(&resume.education) {
        resume.education.clone()
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::LinkedInDetails;

    fn resume_profile() -> SourceProfile {
        SourceProfile {
            name: "Jane Morrison".to_string(),
            email: "jane@example.com".to_string(),
            phone: "4155552671".to_string(),
            technical_skills: vec!["Python".to_string(), "SQL".to_string()],
            soft_skills: vec!["Communication".to_string()],
            experience_years: 4,
            education: vec![EducationEntry {
                degree: "B.Tech".to_string(),
                field: "Computer Science".to_string(),
                institution: String::new(),
                year: String::new(),
            }],
            ..Default::default()
        }
    }

    fn linkedin_profile() -> SourceProfile {
        SourceProfile {
            name: "Jane A. Morrison".to_string(),
            location: "Austin, Texas".to_string(),
            technical_skills: vec!["Docker".to_string(), "Python".to_string()],
            experience_years: 5,
            linkedin: Some(LinkedInDetails {
                headline: "Data Engineer".to_string(),
                current_role: "Data Engineer".to_string(),
                current_company: "Acme".to_string(),
                duration: "Jan 2020 - Present".to_string(),
                certifications: vec!["AWS Certified".to_string()],
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_priority_linkedin_first() {
        let unified = merge_profiles(
            &resume_profile(),
            &SourceProfile::default(),
            &linkedin_profile(),
        );
        assert_eq!(unified.name, "Jane A. Morrison");
    }

    #[test]
    fn test_name_falls_back_past_unknown() {
        let mut linkedin = linkedin_profile();
        linkedin.name = "Unknown".to_string();
        let unified = merge_profiles(&resume_profile(), &SourceProfile::default(), &linkedin);
        assert_eq!(unified.name, "Jane Morrison");
    }

    #[test]
    fn test_name_unknown_when_all_sources_empty() {
        let unified = merge_profiles(
            &SourceProfile::default(),
            &SourceProfile::default(),
            &SourceProfile::default(),
        );
        assert_eq!(unified.name, "Unknown");
    }

    #[test]
    fn test_skills_are_unioned_and_sorted() {
        let unified = merge_profiles(
            &resume_profile(),
            &SourceProfile::default(),
            &linkedin_profile(),
        );
        assert_eq!(
            unified.technical_skills,
            vec!["Docker".to_string(), "Python".to_string(), "SQL".to_string()]
        );
    }

    #[test]
    fn test_experience_takes_maximum() {
        let unified = merge_profiles(
            &resume_profile(),
            &SourceProfile::default(),
            &linkedin_profile(),
        );
        assert_eq!(unified.experience_years, 5);
    }

    #[test]
    fn test_merge_is_monotonic_in_added_source() {
        let base = merge_profiles(
            &resume_profile(),
            &SourceProfile::default(),
            &SourceProfile::default(),
        );
        let with_linkedin = merge_profiles(
            &resume_profile(),
            &SourceProfile::default(),
            &linkedin_profile(),
        );
        assert!(with_linkedin.technical_skills.len() >= base.technical_skills.len());
        assert!(with_linkedin.experience_years >= base.experience_years);
        for skill in &base.technical_skills {
            assert!(with_linkedin.technical_skills.contains(skill));
        }
    }

    #[test]
    fn test_education_prefers_linkedin_unless_placeholder() {
        let mut linkedin = linkedin_profile();
        linkedin.education = vec![EducationEntry::placeholder()];
        let unified = merge_profiles(&resume_profile(), &SourceProfile::default(), &linkedin);
        // Sentinel is absence; the resume list wins.
        assert_eq!(unified.education[0].degree, "B.Tech");

        linkedin.education = vec![EducationEntry {
            degree: "Master".to_string(),
            field: "Data Science".to_string(),
            institution: "Stanford University".to_string(),
            year: "2021".to_string(),
        }];
        let unified = merge_profiles(&resume_profile(), &SourceProfile::default(), &linkedin);
        assert_eq!(unified.education[0].degree, "Master");
    }

    #[test]
    fn test_missing_sources_are_uniformly_empty() {
        let unified = merge_profiles(
            &SourceProfile::default(),
            &SourceProfile::default(),
            &linkedin_profile(),
        );
        assert!(!unified.data_sources.resume);
        assert!(!unified.data_sources.github);
        assert!(unified.data_sources.linkedin);
        assert_eq!(unified.email, "");
    }

    #[test]
    fn test_linkedin_extras_carry_over() {
        let unified = merge_profiles(
            &resume_profile(),
            &SourceProfile::default(),
            &linkedin_profile(),
        );
        assert_eq!(unified.current_company, "Acme");
        assert_eq!(unified.certifications, vec!["AWS Certified".to_string()]);
        assert_eq!(unified.location, "Austin, Texas");
    }
}
