//! Structural segmentation: sections, paragraphs, sentences.
//!
//! Pure functions over normalized text. A single forward pass splits on
//! heading markers; paragraph and sentence splitting operate on the
//! resulting section content.

use std::sync::LazyLock;

use regex::Regex;

use nodeweaver_shared::Section;

/// Split a document into sections on markdown heading lines.
///
/// A line with 1–6 leading `#` markers starts a new section, closing the
/// previous one if it accumulated any content lines. Text before the first
/// heading becomes an initial section with an empty heading at level 0.
/// Empty input yields an empty list.
pub fn segment(text: &str) -> Vec<Section> {
    static HEADING_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid regex"));

    let mut sections = Vec::new();
    let mut heading = String::new();
    let mut level = 0usize;
    let mut content_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = HEADING_RE.captures(line) {
            if !content_lines.is_empty() {
                sections.push(Section {
                    heading: heading.clone(),
                    level,
                    content: content_lines.join("\n").trim().to_string(),
                });
            }
            heading = caps[2].trim().to_string();
            level = caps[1].len();
            content_lines.clear();
        } else {
            content_lines.push(line);
        }
    }

    if !content_lines.is_empty() {
        sections.push(Section {
            heading,
            level,
            content: content_lines.join("\n").trim().to_string(),
        });
    }

    sections
}

/// Split section content into paragraphs on blank-line boundaries.
/// Whitespace-only fragments are discarded.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    static PARA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

    PARA_RE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Characters that may open a sentence after a boundary.
fn opens_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_numeric() || matches!(c, '"' | '“' | '‘' | '\'')
}

/// Split a paragraph into sentences on a punctuation-boundary heuristic.
///
/// A boundary is `.`, `!`, or `?` followed by whitespace and an
/// uppercase/digit/quote character. Requiring the opener avoids splitting
/// after common abbreviations mid-sentence. Joining the result with single
/// spaces reconstructs the input modulo whitespace normalization — nothing
/// is dropped or duplicated.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if matches!(c, '.' | '!' | '?') {
            let mut j = i + 1;
            while j < chars.len() && chars[j].1.is_whitespace() {
                j += 1;
            }
            if j > i + 1 && j < chars.len() && opens_sentence(chars[j].1) {
                let end = pos + c.len_utf8();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = chars[j].0;
                i = j;
                continue;
            }
        }
        i += 1;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_sections() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn preamble_before_first_heading() {
        let sections = segment("mở đầu không có tiêu đề\n\n# Giới thiệu\n\nnội dung");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "");
        assert_eq!(sections[0].level, 0);
        assert_eq!(sections[0].content, "mở đầu không có tiêu đề");
        assert_eq!(sections[1].heading, "Giới thiệu");
        assert_eq!(sections[1].level, 1);
    }

    #[test]
    fn heading_levels_recorded() {
        let sections = segment("# Một\n\na\n\n### Ba\n\nb");
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[1].level, 3);
        assert_eq!(sections[1].heading, "Ba");
    }

    #[test]
    fn consecutive_headings_drop_empty_section() {
        // A heading immediately followed by another accumulates nothing.
        let sections = segment("# Trống\n# Có nội dung\n\nvăn bản");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "Có nội dung");
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let paras = split_paragraphs("đoạn một\ndòng hai\n\n  \n\nđoạn hai");
        assert_eq!(paras, vec!["đoạn một\ndòng hai", "đoạn hai"]);
    }

    #[test]
    fn sentences_split_on_punctuation_boundary() {
        let text = "Tim mạch là bệnh lý nguy hiểm. Việc phòng ngừa rất quan trọng! Ai cần khám?";
        let sentences = split_sentences(text);
        assert_eq!(
            sentences,
            vec![
                "Tim mạch là bệnh lý nguy hiểm.",
                "Việc phòng ngừa rất quan trọng!",
                "Ai cần khám?",
            ]
        );
    }

    #[test]
    fn lowercase_continuation_not_split() {
        // "v.v. và" — lowercase after the period, so no boundary.
        let sentences = split_sentences("Các loại thuốc v.v. và những thứ khác.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn digit_and_quote_open_sentences() {
        let sentences = split_sentences("Kết quả rõ ràng. 25 phần trăm tăng lên. \"Trích dẫn mới\" theo sau.");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn sentence_concatenation_loses_no_text() {
        let text = "Câu thứ nhất ở đây. Câu thứ hai tiếp theo! Câu thứ ba kết thúc.";
        let sentences = split_sentences(text);
        assert_eq!(sentences.join(" "), text);
    }
}
