//! Resume text -> SourceProfile.

use tracing::{debug, warn};

use crate::extract::{education, experience, fields};
use crate::profile::models::SourceProfile;
use crate::taxonomy::{matcher, SkillVocabulary};

/// Text shorter than this is considered unusable (a failed PDF
/// extraction, an empty upload) and yields the empty profile.
const MIN_USABLE_TEXT: usize = 50;

/// Parses raw resume text into a structured profile. Best-effort all the
/// way down: every field that cannot be extracted is defaulted, and text
/// too short to be a resume yields `SourceProfile::default()`.
pub fn parse_resume_text(text: &str, vocabulary: &SkillVocabulary) -> SourceProfile {
    let text = text.trim();
    if text.len() < MIN_USABLE_TEXT {
        warn!("resume text too short to parse ({} bytes)", text.len());
        return SourceProfile::default();
    }

    let profile = SourceProfile {
        name: fields::extract_name(text),
        email: fields::extract_email(text).unwrap_or_default(),
        phone: fields::extract_phone(text).unwrap_or_default(),
        location: String::new(),
        technical_skills: matcher::find_present_skills(text, vocabulary.technical()),
        soft_skills: matcher::find_present_skills(text, vocabulary.soft()),
        experience_years: experience::resume_experience_years(text),
        education: education::extract_resume_education(text),
        github: None,
        linkedin: None,
    };

    debug!(
        technical = profile.technical_skills.len(),
        soft = profile.soft_skills.len(),
        years = profile.experience_years,
        "parsed resume"
    );

    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
JANE MORRISON
jane.morrison@example.com | (415) 555-2671
SUMMARY
Data engineer with a background in machine learning pipelines.
SKILLS
Python, SQL, Docker, AWS, Communication
EXPERIENCE
Data Engineer, Acme Corp, 2019 - 2023
Analyst, Widget Inc, 2017 - 2019
EDUCATION
B.Tech in Computer Science
National Institute of Technology";

    fn vocabulary() -> SkillVocabulary {
        SkillVocabulary::builtin()
    }

    #[test]
    fn test_full_resume_extraction() {
        let profile = parse_resume_text(SAMPLE, &vocabulary());
        assert_eq!(profile.name, "Jane Morrison");
        assert_eq!(profile.email, "jane.morrison@example.com");
        assert_eq!(profile.phone, "4155552671");
        assert_eq!(profile.experience_years, 6);
        assert!(profile.technical_skills.contains(&"Python".to_string()));
        assert!(profile.technical_skills.contains(&"AWS".to_string()));
        assert!(profile.soft_skills.contains(&"Communication".to_string()));
        assert_eq!(profile.education[0].degree, "B.Tech");
        assert_eq!(profile.education[0].field, "Computer Science");
    }

    #[test]
    fn test_short_text_yields_empty_profile() {
        let profile = parse_resume_text("too short", &vocabulary());
        assert!(profile.is_empty());
    }

    #[test]
    fn test_garbage_text_does_not_panic() {
        let garbage = "@@@@ ~~~~ ???? 0x00 \u{fffd}\u{fffd} ".repeat(10);
        let profile = parse_resume_text(&garbage, &vocabulary());
        assert_eq!(profile.name, "Unknown");
        assert!(profile.technical_skills.is_empty());
    }
}
