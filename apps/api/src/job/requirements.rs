//! Job requirement extraction.
//!
//! A short input (<= 5 words) is treated as a bare job title and seeded
//! from a fixed title template; everything else is mined with the skill
//! matcher. Either way the full technical vocabulary is also scanned and
//! unioned in, so a title that happens to name skills still collects them.

use serde::{Deserialize, Serialize};

use crate::extract::{education, experience};
use crate::taxonomy::{matcher, SkillVocabulary};

/// Required skills implied by a bare job title. Keys are matched
/// case-insensitively as substrings of the title.
const TITLE_TEMPLATES: &[(&str, &[&str])] = &[
    (
        "data scientist",
        &[
            "Python",
            "Pandas",
            "NumPy",
            "Matplotlib",
            "Scikit-learn",
            "Machine Learning",
            "Statistics",
            "SQL",
            "Deep Learning",
            "NLP",
            "EDA",
            "Data Visualization",
        ],
    ),
    (
        "machine learning engineer",
        &[
            "Python",
            "TensorFlow",
            "PyTorch",
            "Scikit-learn",
            "Deep Learning",
            "Machine Learning",
            "NLP",
        ],
    ),
    (
        "frontend developer",
        &["HTML", "CSS", "JavaScript", "Angular", "React", "Bootstrap"],
    ),
];

/// Inputs at or below this word count are treated as bare titles.
const BARE_TITLE_MAX_WORDS: usize = 5;

/// How many top-frequency skills count as critical.
const CRITICAL_SKILL_LIMIT: usize = 10;

const TITLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "analyst",
    "manager",
    "architect",
    "scientist",
    "specialist",
    "lead",
    "senior",
    "junior",
];

/// One education requirement from a job description. Unlike resume
/// education these are kept as found, duplicates included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationRequirement {
    pub degree: String,
    pub field: String,
}

/// Structured requirements extracted from a job description or title.
/// Recomputed on every match request, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequirements {
    pub title: String,
    /// Lexicographically sorted.
    pub required_skills: Vec<String>,
    /// Top skills by in-text mention frequency, descending; frequency
    /// ties keep vocabulary order.
    pub critical_skills: Vec<String>,
    pub years_required: u32,
    pub education_required: Vec<EducationRequirement>,
    pub total_skills_required: usize,
}

/// Extracts requirements from a job description or bare title.
pub fn extract_requirements(job_text: &str, vocabulary: &SkillVocabulary) -> JobRequirements {
    let text_lower = job_text.to_lowercase();

    // Deterministic working order: template baseline first (fixed array
    // order), then vocabulary hits not already present. Critical-skill
    // tie-breaking depends on this order being stable.
    let mut required: Vec<String> = Vec::new();

    if job_text.split_whitespace().count() <= BARE_TITLE_MAX_WORDS {
        if let Some((_, skills)) = TITLE_TEMPLATES
            .iter()
            .find(|(title, _)| text_lower.contains(title))
        {
            // Template entries go through the vocabulary index so the
            // canonical casing always wins.
            required.extend(
                skills
                    .iter()
                    .map(|s| vocabulary.canonical(s).unwrap_or(s).to_string()),
            );
        }
    }

    for skill in matcher::find_present_skills(job_text, vocabulary.technical()) {
        if !required.contains(&skill) {
            required.push(skill);
        }
    }

    // Defensive default: an empty requirement set would make every match
    // trivially score zero, so a recognizable data-scientist ask falls
    // back to the role template.
    if required.is_empty() && text_lower.contains("data scientist") {
        let (_, skills) = TITLE_TEMPLATES[0];
        required.extend(
            skills
                .iter()
                .map(|s| vocabulary.canonical(s).unwrap_or(s).to_string()),
        );
    }

    let critical_skills = rank_critical_skills(job_text, &required);

    let mut required_sorted = required;
    required_sorted.sort();

    JobRequirements {
        title: extract_job_title(job_text),
        total_skills_required: required_sorted.len(),
        critical_skills,
        years_required: experience::job_description_years(job_text),
        education_required: education::extract_degree_mentions(job_text)
            .into_iter()
            .map(|(degree, field)| EducationRequirement { degree, field })
            .collect(),
        required_skills: required_sorted,
    }
}

/// Top required skills by mention frequency, descending. The stable sort
/// keeps the incoming (vocabulary) order for ties.
fn rank_critical_skills(job_text: &str, required: &[String]) -> Vec<String> {
    let mut ranked = matcher::skill_mention_frequency(job_text, required);
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(CRITICAL_SKILL_LIMIT)
        .map(|(skill, _)| skill)
        .collect()
}

/// The job title: the first of the leading lines that carries a role
/// keyword, else the first non-empty line.
fn extract_job_title(job_text: &str) -> String {
    let role_line = job_text.lines().take(5).map(str::trim).find(|line| {
        let lower = line.to_lowercase();
        TITLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
    });
    if let Some(line) = role_line {
        return line.to_string();
    }

    job_text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
        .unwrap_or_else(|| "Unknown Position".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> SkillVocabulary {
        SkillVocabulary::builtin()
    }

    #[test]
    fn test_bare_title_uses_template() {
        let req = extract_requirements("Data Scientist", &vocabulary());
        assert!(!req.required_skills.is_empty());
        assert!(req.required_skills.contains(&"Pandas".to_string()));
        assert!(req.required_skills.contains(&"Machine Learning".to_string()));
    }

    #[test]
    fn test_bare_title_case_insensitive_substring() {
        let req = extract_requirements("Senior FRONTEND Developer", &vocabulary());
        assert!(req.required_skills.contains(&"React".to_string()));
        assert!(req.required_skills.contains(&"CSS".to_string()));
    }

    #[test]
    fn test_long_description_skips_templates() {
        let text = "We need someone who knows Rust and Docker for infrastructure work \
                    on our developer platform team in Berlin";
        let req = extract_requirements(text, &vocabulary());
        assert!(req.required_skills.contains(&"Rust".to_string()));
        assert!(req.required_skills.contains(&"Docker".to_string()));
        assert!(!req.required_skills.contains(&"Pandas".to_string()));
    }

    #[test]
    fn test_description_skills_union_with_template() {
        // <= 5 words, matches a template AND names a skill outside it.
        let req = extract_requirements("Data Scientist knowing Kubernetes", &vocabulary());
        assert!(req.required_skills.contains(&"Kubernetes".to_string()));
        assert!(req.required_skills.contains(&"Pandas".to_string()));
    }

    #[test]
    fn test_data_scientist_fallback_when_nothing_extracted() {
        // 8 words: not a bare title, and no vocabulary term appears.
        let text = "seeking a data scientist for our organization immediately";
        let req = extract_requirements(text, &vocabulary());
        assert!(req.required_skills.contains(&"Python".to_string()));
        assert!(req.required_skills.contains(&"EDA".to_string()));
    }

    #[test]
    fn test_required_skills_are_sorted() {
        let req = extract_requirements("Needs SQL, Python and Docker expertise today", &vocabulary());
        let mut sorted = req.required_skills.clone();
        sorted.sort();
        assert_eq!(req.required_skills, sorted);
    }

    #[test]
    fn test_critical_skills_ranked_by_frequency() {
        let text = "Python Python Python, SQL SQL, and some Docker. \
                    This role is mostly Python work with heavy SQL usage.";
        let req = extract_requirements(text, &vocabulary());
        assert_eq!(req.critical_skills[0], "Python");
        assert_eq!(req.critical_skills[1], "SQL");
    }

    #[test]
    fn test_critical_skills_capped_at_ten() {
        let text = "Python JavaScript Java TypeScript Go Rust Ruby PHP Swift Kotlin \
                    Scala Perl used daily across the stack";
        let req = extract_requirements(text, &vocabulary());
        assert!(req.required_skills.len() > 10);
        assert_eq!(req.critical_skills.len(), 10);
    }

    #[test]
    fn test_years_required_maximum() {
        let text = "Role requires 3+ years experience overall and minimum 6 years with Python";
        let req = extract_requirements(text, &vocabulary());
        assert_eq!(req.years_required, 6);
    }

    #[test]
    fn test_education_requirements_kept_as_found() {
        let text = "Bachelor in Engineering required; Bachelor in Engineering strongly preferred. \
                    Also welcome: Master in Statistics candidates with developer experience.";
        let req = extract_requirements(text, &vocabulary());
        assert_eq!(req.education_required.len(), 3);
    }

    #[test]
    fn test_title_from_role_keyword_line() {
        let text = "Acme Corp is hiring!\nSenior Data Engineer\nRemote, full time";
        let req = extract_requirements(text, &vocabulary());
        assert_eq!(req.title, "Senior Data Engineer");
    }

    #[test]
    fn test_title_falls_back_to_first_line() {
        let req = extract_requirements("Great opportunity at Acme\nApply now", &vocabulary());
        assert_eq!(req.title, "Great opportunity at Acme");
    }
}
