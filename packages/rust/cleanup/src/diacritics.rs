//! Stage-2 cleanup pipeline: line breaks and OCR damage in diacritic-rich text.
//!
//! PDF extraction of Vietnamese text routinely splits words across lines and
//! confuses visually similar characters. These passes repair the damage at
//! the character level only — meaning is never changed.

use std::sync::LazyLock;

use regex::Regex;

/// Run the full stage-2 cleanup pipeline.
pub(crate) fn run_pipeline(text: &str) -> String {
    let mut result = text.to_string();

    result = rejoin_line_breaks(&result);
    result = fix_ocr_confusions(&result);
    result = normalize_punctuation(&result);
    result = clean_redundant_whitespace(&result);

    result
}

// ---------------------------------------------------------------------------
// Pass 1: Rejoin words broken across lines
// ---------------------------------------------------------------------------

/// Lines that must never be joined with their successor.
fn is_structural(line: &str) -> bool {
    static NUMBERED_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\s*\d+\.").expect("valid regex"));

    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with('-')
        || NUMBERED_RE.is_match(line)
}

/// Whether a prose line ended without terminal punctuation, suggesting the
/// sentence continues on the next line.
fn ends_open(line: &str) -> bool {
    !line
        .trim_end()
        .ends_with(['.', '!', '?', ':', ';', ','])
}

/// Rejoin words split across lines.
///
/// Two cases: an explicit hyphen break (`điều-\ntrị` → `điều trị` without the
/// hyphen), and a line with no terminal punctuation followed by a line
/// starting lowercase (a continuation). Headings, list items, and blank
/// lines are left untouched.
fn rejoin_line_breaks(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut fixed: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let current = lines[i];

        if is_structural(current) {
            fixed.push(current.to_string());
            i += 1;
            continue;
        }

        let next = if i + 1 < lines.len() {
            lines[i + 1].trim()
        } else {
            ""
        };

        // Explicit hyphen break.
        if current.trim_end().ends_with('-')
            && next.chars().next().is_some_and(char::is_alphabetic)
        {
            let stem = current.trim_end();
            fixed.push(format!("{}{next}", &stem[..stem.len() - 1]));
            i += 2;
            continue;
        }

        // Mid-sentence break: continuation starts lowercase.
        if ends_open(current)
            && !next.starts_with('-')
            && next.chars().next().is_some_and(char::is_lowercase)
        {
            fixed.push(format!("{} {next}", current.trim_end()));
            i += 2;
            continue;
        }

        fixed.push(current.to_string());
        i += 1;
    }

    fixed.join("\n")
}

// ---------------------------------------------------------------------------
// Pass 2: Fix OCR character confusions
// ---------------------------------------------------------------------------

/// Fix obvious OCR mistakes: digit-zero/letter-O swaps, missing space after
/// sentence punctuation, and split country-name spacing. Only unambiguous
/// contexts are touched.
fn fix_ocr_confusions(text: &str) -> String {
    static ZERO_LEADING_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\b0([A-Za-z])").expect("valid regex"));
    static ZERO_TRAILING_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"([A-Za-z])0\b").expect("valid regex"));
    static DOT_UPPER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\.(\p{Lu})").expect("valid regex"));
    static COMMA_WORD_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r",([A-Za-zÀ-ỹ])").expect("valid regex"));
    static VIETNAM_UPPER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\bVIỆT\s+NAM\b").expect("valid regex"));
    static VIETNAM_TITLE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\bViệt\s+Nam\b").expect("valid regex"));

    let result = ZERO_LEADING_RE.replace_all(text, "O$1");
    let result = ZERO_TRAILING_RE.replace_all(&result, "${1}o");
    let result = DOT_UPPER_RE.replace_all(&result, ". $1");
    let result = COMMA_WORD_RE.replace_all(&result, ", $1");
    let result = VIETNAM_UPPER_RE.replace_all(&result, "VIỆT NAM");
    VIETNAM_TITLE_RE.replace_all(&result, "Việt Nam").to_string()
}

// ---------------------------------------------------------------------------
// Pass 3: Normalize punctuation marks
// ---------------------------------------------------------------------------

/// Unify smart quotes, dashes, ellipses, and duplicated terminal punctuation.
fn normalize_punctuation(text: &str) -> String {
    static DQUOTE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new("[“”„]").expect("valid regex"));
    static SQUOTE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new("[‘’‚]").expect("valid regex"));
    static DASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[–—]").expect("valid regex"));
    static ELLIPSIS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\.{4,}").expect("valid regex"));
    static BANG_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("!{2,}").expect("valid regex"));
    static QUESTION_RUN_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\?{2,}").expect("valid regex"));

    let result = DQUOTE_RE.replace_all(text, "\"");
    let result = SQUOTE_RE.replace_all(&result, "'");
    let result = DASH_RE.replace_all(&result, "-");
    let result = ELLIPSIS_RE.replace_all(&result, "...");
    let result = BANG_RUN_RE.replace_all(&result, "!");
    QUESTION_RUN_RE.replace_all(&result, "?").to_string()
}

// ---------------------------------------------------------------------------
// Pass 4: Clean redundant whitespace
// ---------------------------------------------------------------------------

/// Final whitespace pass: collapse space runs, fix spacing around
/// punctuation, cap blank-line runs at one.
fn clean_redundant_whitespace(text: &str) -> String {
    static SPACE_RUN_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(" {2,}").expect("valid regex"));
    static SPACE_BEFORE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[ \t]+([.,!?;:])").expect("valid regex"));
    static SPACE_AFTER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"([.,!?;:])([A-Za-zÀ-ỹ0-9])").expect("valid regex"));
    static NEWLINE_RUN_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

    let result = SPACE_RUN_RE.replace_all(text, " ");
    let result = SPACE_BEFORE_RE.replace_all(&result, "$1");
    let result = SPACE_AFTER_RE.replace_all(&result, "$1 $2");
    NEWLINE_RUN_RE
        .replace_all(&result, "\n\n")
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
    fn hyphen_break_rejoined() {
        let input = "Bệnh nhân được điều-\ntrị kịp thời.";
        let result = rejoin_line_breaks(input);
        assert_eq!(result, "Bệnh nhân được điềutrị kịp thời.");
    }

    #[test]
    fn lowercase_continuation_rejoined() {
        let input = "Đây là một câu chưa kết thúc\nvà phần tiếp theo của nó.";
        let result = rejoin_line_breaks(input);
        assert_eq!(result, "Đây là một câu chưa kết thúc và phần tiếp theo của nó.");
    }

    #[test]
    fn terminated_lines_not_joined() {
        let input = "Câu thứ nhất đã xong.\nCâu thứ hai ở đây.";
        assert_eq!(rejoin_line_breaks(input), input);
    }

    #[test]
    fn headings_and_lists_not_joined() {
        let input = "# Tiêu đề\nnội dung\n- mục một\nvẫn là mục";
        let result = rejoin_line_breaks(input);
        assert!(result.contains("# Tiêu đề\n"));
        assert!(result.contains("- mục một\n"));
    }

    #[test]
    fn zero_letter_confusion_fixed() {
        assert_eq!(fix_ocr_confusions("0ption and Hell0"), "Option and Hello");
    }

    #[test]
    fn missing_space_after_punctuation_fixed() {
        let result = fix_ocr_confusions("Hết câu.Câu mới,tiếp theo");
        assert_eq!(result, "Hết câu. Câu mới, tiếp theo");
    }

    #[test]
    fn country_name_spacing_fixed() {
        let result = fix_ocr_confusions("Việt  Nam và VIỆT\nNAM");
        assert_eq!(result, "Việt Nam và VIỆT NAM");
    }

    #[test]
    fn punctuation_normalized() {
        let result = normalize_punctuation("“Trích dẫn” — đúng vậy!!! Sao??");
        assert_eq!(result, "\"Trích dẫn\" - đúng vậy! Sao?");
    }

    #[test]
    fn ellipsis_capped() {
        assert_eq!(normalize_punctuation("Kết thúc....."), "Kết thúc...");
    }

    #[test]
    fn redundant_whitespace_cleaned() {
        let input = "Một  câu   ,rồi\n\n\n\nhai .";
        let result = clean_redundant_whitespace(input);
        assert_eq!(result, "Một câu, rồi\n\nhai.");
    }

    #[test]
    fn full_pipeline_sample() {
        let input = "# Nghiên cứu khoa học\n\nĐây là một đoạn văn bản tiếng Việt.Có lỗi về khoảng cách.\n\nViệt  Nam là một quốc gia ở Đông Nam Á.\n";
        let result = run_pipeline(input);
        assert!(result.contains("tiếng Việt. Có lỗi"));
        assert!(result.contains("Việt Nam là"));
    }
}
