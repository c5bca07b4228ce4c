//! Identity field extraction: name, email, phone.
//!
//! Name extraction is an ordered strategy chain — first success wins:
//! 1. an all-uppercase header line near the top of the document;
//! 2. a person-entity scan of the first 500 characters (consecutive
//!    Title-Case words);
//! 3. a short Title-Case line with no digits or '@';
//! 4. the literal "Unknown".

use once_cell::sync::Lazy;
use regex::Regex;

/// Section headers that disqualify a line from being a name.
const SECTION_HEADERS: &[&str] = &[
    "SUMMARY",
    "SKILLS",
    "EXPERIENCE",
    "EDUCATION",
    "PROJECTS",
    "CERTIFICATIONS",
    "CONTACT",
];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}\b").expect("email regex")
});

/// Consecutive Title-Case words, 2 to 3 long. Stand-in for the
/// person-entity pass of the name strategy chain.
static PERSON_SEQUENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,2}\b").expect("person regex"));

/// Phone patterns tried in order: international with country code,
/// regional, then a bare digit run. Capture groups isolate the digit
/// blocks so normalization is just concatenation.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\+?\d{1,3})[-.\s]?\(?(\d{3})\)?[-.\s]?(\d{3})[-.\s]?(\d{4})",
        r"\(?(\d{3})\)?[-.\s]?(\d{3})[-.\s]?(\d{4})",
        r"(\+?\d{10,13})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("phone regex"))
    .collect()
});

/// Extracts a candidate name, falling through the strategy chain.
pub fn extract_name(text: &str) -> String {
    uppercase_header_line(text)
        .or_else(|| person_entity_scan(text))
        .or_else(|| title_case_line(text))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Strategy 1: an all-uppercase line of length 5..=50 within the first 5
/// non-empty lines, excluding section headers and lines containing '|'.
pub(crate) fn uppercase_header_line(text: &str) -> Option<String> {
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()).take(5) {
        let len = line.chars().count();
        if !(5..=50).contains(&len) || line.contains('|') {
            continue;
        }
        if !line.chars().any(|c| c.is_alphabetic()) || line != line.to_uppercase() {
            continue;
        }
        if contains_section_header(line) {
            continue;
        }
        return Some(to_title_case(line));
    }
    None
}

/// Strategy 2: first Title-Case word sequence in the leading 500
/// characters that does not collide with a section header.
pub(crate) fn person_entity_scan(text: &str) -> Option<String> {
    let window_end = text
        .char_indices()
        .nth(500)
        .map_or(text.len(), |(idx, _)| idx);
    let window = &text[..window_end];

    PERSON_SEQUENCE_RE
        .find_iter(window)
        .map(|m| m.as_str())
        .find(|candidate| !contains_section_header(candidate))
        .map(String::from)
}

/// Strategy 3: a 2..=4 word Title-Case line with no digits or '@'.
pub(crate) fn title_case_line(text: &str) -> Option<String> {
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.contains('@') || line.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if !(2..=4).contains(&words.len()) {
            continue;
        }
        let title_cased = words.iter().all(|w| {
            let mut chars = w.chars();
            matches!(chars.next(), Some(first) if first.is_uppercase())
                && chars.all(|c| c.is_lowercase() || c == '.' || c == '\'')
        });
        if title_cased && !contains_section_header(line) {
            return Some(line.to_string());
        }
    }
    None
}

fn contains_section_header(line: &str) -> bool {
    let upper = line.to_uppercase();
    SECTION_HEADERS
        .iter()
        .any(|header| upper.split_whitespace().any(|word| word == *header))
}

fn to_title_case(line: &str) -> String {
    line.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First email-shaped match that is not the tail of a URL.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|m| !m.starts_with("http"))
        .map(String::from)
}

/// First phone-shaped match, normalized by concatenating the captured
/// digit groups.
pub fn extract_phone(text: &str) -> Option<String> {
    for pattern in PHONE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let joined: String = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .collect();
            if joined.is_empty() {
                return caps.get(0).map(|m| m.as_str().to_string());
            }
            return Some(joined);
        }
    }
    None
}
