//! Experience-duration heuristics.
//!
//! Resumes and job descriptions carry this signal differently: resumes
//! imply it through dated entries in the Experience section, job
//! descriptions state it as "N years experience" phrasing. The two modes
//! are separate functions on purpose.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Text between an "Experience" heading and the next known section.
static EXPERIENCE_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\bexperience\b(.*?)(?:\bprojects\b|\beducation\b|\bcertifications\b)")
        .expect("experience section regex")
});

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(20\d{2})\b").expect("year regex"));

/// Explicit "N years experience" phrasings, in the order they are tried.
static YEARS_PHRASE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(\d+)\+?\s*(?:years?|yrs?)\s*(?:of\s+)?experience",
        r"(?i)experience[^\n]*?(\d+)\+?\s*(?:years?|yrs?)",
        r"(?i)minimum[^\n]*?(\d+)\+?\s*(?:years?|yrs?)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("years phrase regex"))
    .collect()
});

/// Estimates years of experience from the dated span of a resume's
/// Experience section: max - min over distinct 20xx years when at least
/// two are present, 1 when exactly one is present, otherwise 0.
pub fn resume_experience_years(text: &str) -> u32 {
    let section = match EXPERIENCE_SECTION_RE.captures(text) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()).to_string(),
        None => return 0,
    };

    let years: BTreeSet<u32> = YEAR_RE
        .captures_iter(&section)
        .filter_map(|c| c.get(1)?.as_str().parse().ok())
        .collect();

    match (years.first(), years.last()) {
        (Some(_), Some(_)) if years.len() == 1 => 1,
        (Some(first), Some(last)) => last - first,
        _ => 0,
    }
}

/// Years required by a job description: the maximum over every match of
/// every "N years" phrasing, 0 when none matches.
pub fn job_description_years(text: &str) -> u32 {
    YEARS_PHRASE_PATTERNS
        .iter()
        .flat_map(|pattern| {
            pattern
                .captures_iter(text)
                .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
                .collect::<Vec<_>>()
        })
        .max()
        .unwrap_or(0)
}
