//! Keyword-driven tag and domain classification.
//!
//! Matching is purely lexical: lowercased whole-word keyword counts against
//! the vocabularies in [`crate::tags`]. Content, section heading, and source
//! identifier contribute with decreasing weight, and the output order is
//! deterministic for identical input.

use nodeweaver_shared::UNKNOWN_DOMAIN;

use crate::tags::{DOMAIN_DEFINITIONS, TAG_DEFINITIONS};

/// Minimum keyword hits in node content before a tag is considered.
const CONTENT_MATCH_THRESHOLD: usize = 2;
/// Weight added for a tag found in the section heading.
const SECTION_WEIGHT: usize = 5;
/// Weight added for a tag found in the source identifier.
const SOURCE_WEIGHT: usize = 3;

/// Lowercase and collapse all whitespace runs to single spaces.
fn normalize_text(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Count non-overlapping whole-word occurrences of `keyword` in `haystack`.
///
/// A match requires a word/non-word transition at both ends, evaluated
/// against the keyword's own edge characters, so keywords ending in symbols
/// (`c++`) behave like their regex `\b`-delimited equivalents.
fn count_whole_word(haystack: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    let first_is_word = keyword.chars().next().map(is_word_char).unwrap_or(false);
    let last_is_word = keyword.chars().next_back().map(is_word_char).unwrap_or(false);

    let mut count = 0;
    for (start, _) in haystack.match_indices(keyword) {
        let prev_is_word = haystack[..start]
            .chars()
            .next_back()
            .map(is_word_char)
            .unwrap_or(false);
        let next_is_word = haystack[start + keyword.len()..]
            .chars()
            .next()
            .map(is_word_char)
            .unwrap_or(false);
        if prev_is_word != first_is_word && next_is_word != last_is_word {
            count += 1;
        }
    }
    count
}

/// Total keyword hits for one vocabulary entry.
fn score_entry(normalized: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .map(|keyword| count_whole_word(normalized, &keyword.to_lowercase()))
        .sum()
}

/// Tags whose keywords occur at least `min_matches` times, most hits first.
/// Ties keep vocabulary order.
pub fn extract_tags(text: &str, min_matches: usize) -> Vec<&'static str> {
    let normalized = normalize_text(text);
    let mut scored: Vec<(&'static str, usize)> = TAG_DEFINITIONS
        .iter()
        .filter_map(|(tag, keywords)| {
            let hits = score_entry(&normalized, keywords);
            (hits >= min_matches.max(1)).then_some((*tag, hits))
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(tag, _)| tag).collect()
}

/// Primary domain of `text` (with the source identifier as extra signal),
/// or [`UNKNOWN_DOMAIN`] when no keyword matches at all. Score ties resolve
/// to the earlier vocabulary entry.
pub fn detect_domain(text: &str, source_identifier: &str) -> String {
    let normalized = normalize_text(&format!("{text} {source_identifier}"));
    let mut best: Option<(&str, usize)> = None;
    for (domain, keywords) in DOMAIN_DEFINITIONS {
        let hits = score_entry(&normalized, keywords);
        if hits > 0 && best.map(|(_, b)| hits > b).unwrap_or(true) {
            best = Some((domain, hits));
        }
    }
    best.map(|(domain, _)| domain.to_string())
        .unwrap_or_else(|| UNKNOWN_DOMAIN.to_string())
}

/// Classify one node: weighted tags capped at `max_tags`, plus its domain.
///
/// Content hits carry rank-decayed weight `10 - min(rank, 9)` and need at
/// least two keyword occurrences; a section-heading hit adds 5 and a
/// source-identifier hit adds 3, each needing a single occurrence.
pub fn classify(
    content: &str,
    section_heading: &str,
    source_identifier: &str,
    max_tags: usize,
) -> (Vec<String>, String) {
    // Insertion order matters: the stable final sort breaks score ties in
    // favor of content tags, then heading tags, then source tags.
    let mut scores: Vec<(&'static str, usize)> = Vec::new();
    let mut bump = |tag: &'static str, weight: usize| {
        match scores.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, score)) => *score += weight,
            None => scores.push((tag, weight)),
        }
    };

    for (rank, tag) in extract_tags(content, CONTENT_MATCH_THRESHOLD).into_iter().enumerate() {
        bump(tag, 10 - rank.min(9));
    }
    if !section_heading.is_empty() {
        for tag in extract_tags(section_heading, 1) {
            bump(tag, SECTION_WEIGHT);
        }
    }
    if !source_identifier.is_empty() {
        for tag in extract_tags(source_identifier, 1) {
            bump(tag, SOURCE_WEIGHT);
        }
    }

    scores.sort_by(|a, b| b.1.cmp(&a.1));
    let tags = scores
        .into_iter()
        .take(max_tags)
        .map(|(tag, _)| tag.to_string())
        .collect();

    (tags, detect_domain(content, source_identifier))
}
