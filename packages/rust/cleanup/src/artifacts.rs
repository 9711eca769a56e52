//! Stage-1 cleanup pipeline: page artifacts and markdown structure.
//!
//! Each cleanup pass is a function `&str -> String` applied in sequence.
//! The pipeline removes page furniture, drops repeated running headers,
//! fixes punctuation spacing, and re-canonicalizes headings and lists.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Run the full stage-1 cleanup pipeline on raw extracted text.
pub(crate) fn run_pipeline(text: &str) -> String {
    let mut result = text.to_string();

    result = remove_page_artifacts(&result);
    result = remove_repeated_lines(&result);
    result = fix_punctuation_spacing(&result);
    result = canonicalize_structure(&result);
    result = normalize_whitespace(&result);

    result
}

// ---------------------------------------------------------------------------
// Pass 1: Remove page artifacts
// ---------------------------------------------------------------------------

/// Drop standalone page numbers, `Page N`/`Trang N` markers, and divider rules.
fn remove_page_artifacts(text: &str) -> String {
    static PAGE_NUMBER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[\d\-–—]+$").expect("valid regex"));
    static PAGE_MARKER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)^(Page|Trang|p\.?|tr\.?)\s*\d+").expect("valid regex"));
    static DIVIDER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[\-_=~]{3,}$").expect("valid regex"));

    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let stripped = line.trim();
            !(PAGE_NUMBER_RE.is_match(stripped)
                || PAGE_MARKER_RE.is_match(stripped)
                || DIVIDER_RE.is_match(stripped))
        })
        .collect();

    kept.join("\n")
}

// ---------------------------------------------------------------------------
// Pass 2: Remove repeated headers/footers
// ---------------------------------------------------------------------------

/// Minimum occurrences for a line to count as a running header/footer.
const REPEAT_THRESHOLD: usize = 2;

/// Minimum length — short repeated lines (list markers, numbers) are content.
const REPEAT_MIN_LEN: usize = 50;

/// Drop long lines that recur across pages. Headings are exempt.
fn remove_repeated_lines(text: &str) -> String {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for line in text.lines() {
        let norm = line.trim().to_lowercase();
        if !norm.is_empty() {
            *counts.entry(norm).or_insert(0) += 1;
        }
    }

    let repeated: Vec<&String> = counts
        .iter()
        .filter(|(line, count)| **count >= REPEAT_THRESHOLD && line.chars().count() >= REPEAT_MIN_LEN)
        .map(|(line, _)| line)
        .collect();

    if repeated.is_empty() {
        return text.to_string();
    }

    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let norm = line.trim().to_lowercase();
            line.trim().starts_with('#') || !repeated.iter().any(|r| **r == norm)
        })
        .collect();

    kept.join("\n")
}

// ---------------------------------------------------------------------------
// Pass 3: Fix punctuation spacing
// ---------------------------------------------------------------------------

/// Collapse double spaces after sentence punctuation and drop stray spaces
/// before punctuation.
fn fix_punctuation_spacing(text: &str) -> String {
    static AFTER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"([.!?])\s{2,}").expect("valid regex"));
    static BEFORE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[ \t]+([.!?,;:])").expect("valid regex"));

    let result = AFTER_RE.replace_all(text, "$1 ");
    BEFORE_RE.replace_all(&result, "$1").to_string()
}

// ---------------------------------------------------------------------------
// Pass 4: Canonicalize markdown structure
// ---------------------------------------------------------------------------

/// Re-emit headings and list items in canonical form.
///
/// Headings lose bold markers (`# **Title**` → `# Title`), bullet markers
/// unify on `-`, and numbered items unify on `N.`.
fn canonicalize_structure(text: &str) -> String {
    static HEADING_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(#{1,6})\s*\*{0,2}(.+?)\*{0,2}\s*$").expect("valid regex"));
    static BULLET_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(\s*)[-*•]\s+(.*)$").expect("valid regex"));
    static NUMBERED_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(\s*)(\d+)[.)]\s+(.*)$").expect("valid regex"));

    let lines: Vec<String> = text
        .lines()
        .map(|line| {
            if let Some(caps) = HEADING_RE.captures(line) {
                let level = &caps[1];
                let heading = caps[2].replace('*', "");
                format!("{level} {}", heading.trim())
            } else if let Some(caps) = BULLET_RE.captures(line) {
                format!("{}- {}", &caps[1], &caps[2])
            } else if let Some(caps) = NUMBERED_RE.captures(line) {
                format!("{}{}. {}", &caps[1], &caps[2], &caps[3])
            } else {
                line.to_string()
            }
        })
        .collect();

    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Pass 5: Normalize whitespace
// ---------------------------------------------------------------------------

/// Normalize whitespace while preserving markdown structure: unify line
/// endings, collapse interior space runs (indentation untouched), strip
/// trailing whitespace, cap blank-line runs.
fn normalize_whitespace(text: &str) -> String {
    static INTERIOR_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("valid regex"));
    static BLANK_RUN_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\n{4,}").expect("valid regex"));

    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let lines: Vec<String> = unified
        .lines()
        .map(|line| {
            let body_start = line
                .find(|c: char| c != ' ' && c != '\t')
                .unwrap_or(line.len());
            let (indent, body) = line.split_at(body_start);
            let collapsed = INTERIOR_RE.replace_all(body, " ");
            format!("{indent}{}", collapsed.trim_end())
        })
        .collect();

    BLANK_RUN_RE
        .replace_all(&lines.join("\n"), "\n\n\n")
        .trim()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_artifacts_dropped() {
        let input = "Nội dung trang một\n12\nTrang 3\n---\nPage 4\nNội dung tiếp theo";
        let result = remove_page_artifacts(input);
        assert_eq!(result, "Nội dung trang một\nNội dung tiếp theo");
    }

    #[test]
    fn repeated_running_header_dropped() {
        let header = "Tạp chí nghiên cứu khoa học và công nghệ — số 42 năm 2025";
        let input = format!("{header}\nNội dung một\n{header}\nNội dung hai");
        let result = remove_repeated_lines(&input);
        assert_eq!(result, "Nội dung một\nNội dung hai");
    }

    #[test]
    fn short_repeated_lines_kept() {
        let input = "- mục\nvăn bản\n- mục";
        let result = remove_repeated_lines(input);
        assert_eq!(result, input);
    }

    #[test]
    fn repeated_headings_kept() {
        let heading = "# Chương trình đào tạo chuyên sâu về khoa học dữ liệu ứng dụng";
        let input = format!("{heading}\nmột\n{heading}\nhai");
        let result = remove_repeated_lines(&input);
        assert!(result.matches(heading).count() == 2);
    }

    #[test]
    fn punctuation_spacing_fixed() {
        let input = "Hết câu .  Câu mới bắt đầu , đúng không ?";
        let result = fix_punctuation_spacing(input);
        assert_eq!(result, "Hết câu. Câu mới bắt đầu, đúng không?");
    }

    #[test]
    fn headings_lose_bold_markers() {
        let result = canonicalize_structure("## **Kết luận**");
        assert_eq!(result, "## Kết luận");
    }

    #[test]
    fn list_markers_unified() {
        let input = "- Một\n* Hai\n• Ba\n1) Bốn\n  2. Năm";
        let result = canonicalize_structure(input);
        assert_eq!(result, "- Một\n- Hai\n- Ba\n1. Bốn\n  2. Năm");
    }

    #[test]
    fn whitespace_normalized_preserving_indent() {
        let input = "plain  text   here   \r\n  indented   line\t\n\n\n\n\n\nend";
        let result = normalize_whitespace(input);
        assert_eq!(result, "plain text here\n  indented line\n\n\nend");
    }

    #[test]
    fn full_pipeline_sample() {
        let input = "# **Title**\n\nPage 1\n\nThis is  some   text .\n\n- Item 1\n* Item 2\n1) Item 3\n\nPage 2\n";
        let result = run_pipeline(input);
        assert!(result.starts_with("# Title"));
        assert!(!result.contains("Page"));
        assert!(result.contains("This is some text."));
        assert!(result.contains("- Item 2"));
        assert!(result.contains("1. Item 3"));
    }
}
