//! Education extraction from resume-style text.
//!
//! Degree mentions are found by keyword, their field by the trailing
//! "in <field>" clause, and an optional "with specialization in <spec>"
//! clause is folded into the field. Institutions are collected from
//! keyword lines and zipped positionally onto the degree entries. When no
//! degree matches at all, a single all-"N/A" sentinel entry stands for
//! "no education data" — callers must treat it as absence, not as a
//! literal degree.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::models::EducationEntry;

static DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(Bachelor|Master|PhD|B\.?\s?Tech|M\.?\s?Tech|MBA|Associate|Diploma)\b")
        .expect("degree regex")
});

/// The "in <field>" clause immediately after a degree keyword.
static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:of|in)\s+([A-Za-z][A-Za-z &]*)").expect("field regex")
});

/// A bare specialization clause with no preceding field.
static SPECIALIZATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*with\s+specialization\s+in\s+([A-Za-z][A-Za-z &]*)")
        .expect("specialization regex")
});

/// Splits a captured field on an embedded specialization clause.
static EMBEDDED_SPECIALIZATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+with\s+specialization\s+in\s+").expect("embedded specialization regex")
});

const INSTITUTION_KEYWORDS: &[&str] = &["University", "Institute", "College", "School"];

/// Words that end a field capture; anything after them is location or
/// narrative, not the field of study.
const FIELD_STOP_WORDS: &[&str] = &["from", "at"];

/// Every (degree, field) mention in document order, not deduplicated.
/// Job-description extraction wants the raw list; resume extraction
/// dedupes on top of this.
pub fn extract_degree_mentions(text: &str) -> Vec<(String, String)> {
    let mut mentions = Vec::new();
    for caps in DEGREE_RE.captures_iter(text) {
        let degree_match = match caps.get(1) {
            Some(m) => m,
            None => continue,
        };
        let rest_of_line = text[degree_match.end()..]
            .split('\n')
            .next()
            .unwrap_or_default();
        mentions.push((
            degree_match.as_str().to_string(),
            field_from_clause(rest_of_line),
        ));
    }
    mentions
}

/// Resume-mode education: deduplicated (degree, field) pairs with
/// institutions zipped on positionally, or the sentinel entry.
pub fn extract_resume_education(text: &str) -> Vec<EducationEntry> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut entries: Vec<EducationEntry> = Vec::new();

    for (degree, field) in extract_degree_mentions(text) {
        let key = (degree.to_lowercase(), field.to_lowercase());
        if seen.insert(key) {
            entries.push(EducationEntry {
                degree,
                field,
                institution: String::new(),
                year: String::new(),
            });
        }
    }

    if entries.is_empty() {
        return vec![EducationEntry::placeholder()];
    }

    let institutions = institution_lines(text);
    for (entry, institution) in entries.iter_mut().zip(institutions) {
        entry.institution = institution;
    }

    entries
}

/// Lines that look like institution names, in document order.
pub fn institution_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            INSTITUTION_KEYWORDS
                .iter()
                .any(|keyword| line.contains(keyword))
        })
        .map(String::from)
        .collect()
}

/// Resolves the field of study from the text following a degree keyword:
/// "in <field>", "of <field>", an optional specialization folded in as
/// "field, specialization", or empty.
fn field_from_clause(rest_of_line: &str) -> String {
    if let Some(caps) = FIELD_RE.captures(rest_of_line) {
        let captured = truncate_at_stop_word(caps[1].trim());
        return match EMBEDDED_SPECIALIZATION_RE.find(&captured) {
            Some(split) => {
                let base = captured[..split.start()].trim();
                let specialization = captured[split.end()..].trim();
                if base.is_empty() {
                    specialization.to_string()
                } else {
                    format!("{base}, {specialization}")
                }
            }
            None => captured,
        };
    }

    if let Some(caps) = SPECIALIZATION_RE.captures(rest_of_line) {
        return truncate_at_stop_word(caps[1].trim());
    }

    String::new()
}

fn truncate_at_stop_word(field: &str) -> String {
    let mut kept = Vec::new();
    for word in field.split_whitespace() {
        if FIELD_STOP_WORDS.contains(&word.to_lowercase().as_str()) {
            break;
        }
        kept.push(word);
    }
    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_with_field() {
        let entries = extract_resume_education("Bachelor of Computer Science\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "Bachelor");
        assert_eq!(entries[0].field, "Computer Science");
    }

    #[test]
    fn test_specialization_is_folded_into_field() {
        let entries = extract_resume_education(
            "Master in Data Science with specialization in Machine Learning\n",
        );
        assert_eq!(entries[0].field, "Data Science, Machine Learning");
    }

    #[test]
    fn test_bare_specialization_becomes_field() {
        let entries =
            extract_resume_education("MBA with specialization in Finance\n");
        assert_eq!(entries[0].degree, "MBA");
        assert_eq!(entries[0].field, "Finance");
    }

    #[test]
    fn test_duplicate_degree_field_pairs_are_deduplicated() {
        let text = "B.Tech in Computer Science\nSome text\nb.tech in computer science\n";
        let entries = extract_resume_education(text);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_institutions_zip_positionally() {
        let text = "\
B.Tech in Electronics
National Institute of Technology
Master in Data Science
Stanford University
";
        let entries = extract_resume_education(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].institution, "National Institute of Technology");
        assert_eq!(entries[1].institution, "Stanford University");
    }

    #[test]
    fn test_field_stops_before_location_words() {
        let entries = extract_resume_education("Bachelor of Physics from MIT\n");
        assert_eq!(entries[0].field, "Physics");
    }

    #[test]
    fn test_no_degree_yields_sentinel() {
        let entries = extract_resume_education("just some text with no credentials");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_placeholder());
        assert_eq!(entries[0].degree, "N/A");
    }

    #[test]
    fn test_degree_without_field() {
        let entries = extract_resume_education("Diploma, 2018\n");
        assert_eq!(entries[0].degree, "Diploma");
        assert_eq!(entries[0].field, "");
    }

    #[test]
    fn test_job_description_mentions_are_not_deduplicated() {
        let text = "Bachelor in Engineering required. Bachelor in Engineering preferred.";
        let mentions = extract_degree_mentions(text);
        assert_eq!(mentions.len(), 2);
    }
}
