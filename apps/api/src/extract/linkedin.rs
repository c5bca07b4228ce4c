//! LinkedIn profile-export text -> SourceProfile.
//!
//! LinkedIn PDF exports are section-structured ("Summary", "Experience",
//! "Education", "Skills", ...) with one value per line inside each
//! section, so this parser leans on section splitting where the resume
//! parser leans on whole-document patterns.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::profile::models::{EducationEntry, LinkedInDetails, SourceProfile};
use crate::taxonomy::{matcher, SkillVocabulary};

/// LinkedIn exports below this size carry no usable sections.
const MIN_USABLE_TEXT: usize = 100;

const NAME_EXCLUDED_LINES: &[&str] = &["Summary", "Experience", "Education", "Skills"];

const HEADLINE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "analyst",
    "manager",
    "scientist",
    "specialist",
];

/// Entries in the Experience section that are not jobs.
const NON_JOB_KEYWORDS: &[&str] = &[
    "Course",
    "Certification",
    "Hackathon",
    "Award",
    "Certificate",
    "Challenge",
    "Workshop",
];

/// Company names that appear alone in the certifications section as
/// issuer headers, not as certifications.
const CERT_ISSUER_LINES: &[&str] = &["Amazon Web Services (AWS)", "Google Cloud", "Microsoft"];

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z][a-z]+(?: [A-Z][a-z]+)*, [A-Z][a-z]+(?: [A-Z][a-z]+)*)")
        .expect("location regex")
});

static LINKEDIN_DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(B\.?\s?Tech|B\.?E\.?|Bachelor|Master|M\.?\s?Tech|MBA|Ph\.?D)\b(?:\s+(?:of|in)\s+)?\s*([A-Za-z][A-Za-z ,&]*)?",
    )
    .expect("linkedin degree regex")
});

static YEAR_IN_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").expect("year regex"));

/// Duration strings like "Jan 2020 - Present" or "Jan 2020 - Dec 2023".
static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4}).*?(?:Present|(\d{4}))").expect("duration regex"));

/// Parses LinkedIn export text into a structured profile. Empty or
/// near-empty text yields the empty profile.
pub fn parse_linkedin_text(text: &str, vocabulary: &SkillVocabulary) -> SourceProfile {
    let text = text.trim();
    if text.len() < MIN_USABLE_TEXT {
        warn!("linkedin text too short to parse ({} bytes)", text.len());
        return SourceProfile::default();
    }

    let (current_role, current_company, duration) = extract_current_position(text);
    let details = LinkedInDetails {
        headline: extract_headline(text),
        location: extract_location(text),
        current_role,
        current_company,
        duration: duration.clone(),
        certifications: extract_certifications(text),
    };

    let profile = SourceProfile {
        name: extract_name(text),
        email: String::new(),
        phone: String::new(),
        location: details.location.clone(),
        technical_skills: matcher::find_present_skills(text, vocabulary.technical()),
        soft_skills: matcher::find_present_skills(text, vocabulary.soft()),
        experience_years: years_from_duration(&duration),
        education: extract_education(text),
        github: None,
        linkedin: Some(details),
    };

    debug!(
        skills = profile.technical_skills.len(),
        certifications = profile
            .linkedin
            .as_ref()
            .map_or(0, |d| d.certifications.len()),
        "parsed linkedin export"
    );

    profile
}

/// Extracts the body of a named section: everything between the header
/// line and the next lone word line (the following header) or the end of
/// the document.
pub(crate) fn profile_section(text: &str, section_name: &str) -> String {
    let pattern = format!(
        r"(?is){}\s*\n(.*?)(?:\n[A-Z][a-z]+\s*\n|$)",
        regex::escape(section_name)
    );
    match Regex::new(&pattern) {
        Ok(re) => re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Name: the first short, digit-free, link-free line near the top that is
/// not a section header. A "Contact " prefix from the export layout is
/// stripped first.
fn extract_name(text: &str) -> String {
    for line in text.lines().take(5) {
        let line = line
            .trim()
            .trim_start_matches("Contact ")
            .trim_start_matches("CONTACT ")
            .trim();
        let len = line.chars().count();
        if !(4..50).contains(&len) || line.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        let lower = line.to_lowercase();
        if ["http", "www", "@", "|"].iter().any(|tok| lower.contains(tok)) {
            continue;
        }
        if !line.chars().next().is_some_and(char::is_uppercase) {
            continue;
        }
        if NAME_EXCLUDED_LINES.contains(&line) {
            continue;
        }
        return line.to_string();
    }
    "Unknown".to_string()
}

/// Headline: the first of the leading lines carrying a role keyword.
fn extract_headline(text: &str) -> String {
    text.lines()
        .take(15)
        .map(str::trim)
        .find(|line| {
            let lower = line.to_lowercase();
            HEADLINE_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .map(String::from)
        .unwrap_or_default()
}

/// Location: first "City, Region" shaped match anywhere in the document.
fn extract_location(text: &str) -> String {
    LOCATION_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Current position from the Experience section: the company and title
/// lines preceding a "Present" duration line. Course/certification/award
/// entries masquerading as positions are filtered out.
fn extract_current_position(text: &str) -> (String, String, String) {
    let section = profile_section(text, "Experience");
    if section.is_empty() {
        return Default::default();
    }

    let lines: Vec<&str> = section
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    for (i, line) in lines.iter().enumerate() {
        if !line.to_lowercase().contains("present") {
            continue;
        }
        // Export layout: company, then title, then the duration line.
        let (company, title) = match i {
            0 => continue,
            1 => ("", lines[0]),
            _ => (lines[i - 2], lines[i - 1]),
        };
        if NON_JOB_KEYWORDS.iter().any(|kw| title.contains(kw)) {
            continue;
        }
        return (title.to_string(), company.to_string(), line.to_string());
    }

    Default::default()
}

/// Certifications: content lines of the certifications section, skipping
/// lone issuer names.
fn extract_certifications(text: &str) -> Vec<String> {
    let section = {
        let licensed = profile_section(text, "Licenses & Certifications");
        if licensed.is_empty() {
            profile_section(text, "Certifications")
        } else {
            licensed
        }
    };

    section
        .lines()
        .map(str::trim)
        .filter(|line| line.len() > 5 && !CERT_ISSUER_LINES.contains(line))
        .map(String::from)
        .collect()
}

/// Education entries: an institution line followed by a degree line and
/// an optional year line.
fn extract_education(text: &str) -> Vec<EducationEntry> {
    let section = profile_section(text, "Education");
    let lines: Vec<&str> = section
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut education = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let is_institution = ["University", "Institute", "College", "School"]
            .iter()
            .any(|kw| line.contains(kw));
        if is_institution {
            let mut entry = EducationEntry {
                institution: line.to_string(),
                ..Default::default()
            };
            if let Some(next) = lines.get(i + 1) {
                if let Some(caps) = LINKEDIN_DEGREE_RE.captures(next) {
                    entry.degree = caps
                        .get(1)
                        .map(|m| m.as_str().trim().to_string())
                        .unwrap_or_default();
                    entry.field = caps
                        .get(2)
                        .map(|m| m.as_str().trim_end_matches('·').trim().to_string())
                        .unwrap_or_default();
                    i += 1;
                    if let Some(year_line) = lines.get(i + 1) {
                        if YEAR_IN_LINE_RE.is_match(year_line) {
                            entry.year = year_line.to_string();
                            i += 1;
                        }
                    }
                }
            }
            if !entry.degree.is_empty() || !entry.field.is_empty() {
                education.push(entry);
            }
        }
        i += 1;
    }

    if education.is_empty() {
        vec![EducationEntry::placeholder()]
    } else {
        education
    }
}

/// Years of experience implied by a duration string. "Present" means the
/// current year.
pub(crate) fn years_from_duration(duration: &str) -> u32 {
    let Some(caps) = DURATION_RE.captures(duration) else {
        return 0;
    };
    let start: i32 = match caps.get(1).and_then(|m| m.as_str().parse().ok()) {
        Some(year) => year,
        None => return 0,
    };
    let end: i32 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or_else(|| Utc::now().year());
    (end - start).max(0) as u32
}
