//! Boundary-aware skill matching.
//!
//! Every lookup case-folds both the text and the vocabulary entry, then
//! requires the occurrence to be delimited by non-alphanumeric characters
//! on both sides. A plain substring test would report "Go" inside
//! "Google" or "R" inside "React"; the boundary test is what makes the
//! one- and two-letter entries usable at all.
//!
//! Pure functions of `(text, vocabulary)` — no shared state, safe to call
//! from concurrent requests.

/// Returns the canonical vocabulary entries that occur at least once in
/// `text`, in vocabulary order. Idempotent, and independent of any
/// reordering of `vocabulary` up to result ordering.
pub fn find_present_skills(text: &str, vocabulary: &[String]) -> Vec<String> {
    let text_lower = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|skill| count_boundary_matches(&text_lower, &skill.to_lowercase()) > 0)
        .cloned()
        .collect()
}

/// Counts non-overlapping boundary-delimited occurrences of each skill in
/// `text`. Used to rank importance: more mentions, more important. The
/// result preserves the iteration order of `skills`, so frequency ties
/// resolve deterministically.
pub fn skill_mention_frequency(text: &str, skills: &[String]) -> Vec<(String, usize)> {
    let text_lower = text.to_lowercase();
    skills
        .iter()
        .map(|skill| {
            (
                skill.clone(),
                count_boundary_matches(&text_lower, &skill.to_lowercase()),
            )
        })
        .collect()
}

/// Counts non-overlapping occurrences of `needle` in `haystack` where the
/// characters immediately before and after the occurrence are absent or
/// non-alphanumeric. Both inputs must already be case-folded.
///
/// `\b` from the regex crate is not usable here: entries like "C++", "C#"
/// and ".NET" end or begin with non-word characters, where `\b` inverts
/// its meaning. A manual scan sidesteps that.
fn count_boundary_matches(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut from = 0;
    while let Some(found) = haystack[from..].find(needle) {
        let start = from + found;
        let end = start + needle.len();

        let before_clear = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_clear = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if before_clear && after_clear {
            count += 1;
            from = end;
        } else {
            // Advance one char past the failed position, staying on a
            // UTF-8 boundary.
            let step = haystack[start..]
                .chars()
                .next()
                .map_or(1, |c| c.len_utf8());
            from = start + step;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_go_does_not_match_inside_google() {
        let found = find_present_skills("I work at Googleplex", &vocab(&["Go"]));
        assert!(found.is_empty());
    }

    #[test]
    fn test_golang_is_not_go_counts_once() {
        let freq = skill_mention_frequency("Golang is not Go", &vocab(&["Go"]));
        assert_eq!(freq, vec![("Go".to_string(), 1)]);
    }

    #[test]
    fn test_short_entries_require_boundaries() {
        let found = find_present_skills("Proficient in C, R and React", &vocab(&["C", "R"]));
        assert_eq!(found, vec!["C".to_string(), "R".to_string()]);

        let found = find_present_skills("CRISPR research", &vocab(&["C", "R"]));
        assert!(found.is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive_returns_canonical() {
        let found = find_present_skills("experience with PYTHON and docker", &vocab(&["Python", "Docker"]));
        assert_eq!(found, vec!["Python".to_string(), "Docker".to_string()]);
    }

    #[test]
    fn test_non_word_skill_names_match() {
        let found = find_present_skills(
            "Shipped services in C++ and C#, not plain C",
            &vocab(&["C++", "C#", "C"]),
        );
        assert_eq!(
            found,
            vec!["C++".to_string(), "C#".to_string(), "C".to_string()]
        );
    }

    #[test]
    fn test_cpp_does_not_match_bare_c_text() {
        let found = find_present_skills("Plain C only", &vocab(&["C++"]));
        assert!(found.is_empty());
    }

    #[test]
    fn test_idempotent_and_order_independent() {
        let text = "Python, Docker, SQL and Python again";
        let forward = vocab(&["Python", "Docker", "SQL"]);
        let shuffled = vocab(&["SQL", "Python", "Docker"]);

        let a = find_present_skills(text, &forward);
        let b = find_present_skills(text, &forward);
        assert_eq!(a, b);

        let mut from_shuffled = find_present_skills(text, &shuffled);
        let mut from_forward = a;
        from_shuffled.sort();
        from_forward.sort();
        assert_eq!(from_shuffled, from_forward);
    }

    #[test]
    fn test_frequency_counts_non_overlapping_mentions() {
        let freq = skill_mention_frequency(
            "Python first, python second, PYTHON third, SQL once",
            &vocab(&["Python", "SQL", "Docker"]),
        );
        assert_eq!(
            freq,
            vec![
                ("Python".to_string(), 3),
                ("SQL".to_string(), 1),
                ("Docker".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_multi_word_skills_match_across_spaces() {
        let found = find_present_skills(
            "Background in machine learning and deep learning",
            &vocab(&["Machine Learning", "Deep Learning", "Learning"]),
        );
        assert_eq!(
            found,
            vec![
                "Machine Learning".to_string(),
                "Deep Learning".to_string(),
                "Learning".to_string()
            ]
        );
    }
}
