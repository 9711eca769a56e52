//! Text normalization passes for extracted document content.
//!
//! Two stages run ahead of segmentation, each a sequence of
//! `&str -> String` passes:
//! - [`clean_artifacts`] strips page furniture left by PDF extraction
//!   (page numbers, running headers/footers, divider rules) and
//!   re-canonicalizes markdown structure.
//! - [`clean_diacritics`] repairs language-specific damage in
//!   diacritic-rich text: words broken across lines, OCR character
//!   confusions, and punctuation spacing.
//!
//! Both stages preserve meaning — they never paraphrase or reorder content.

mod artifacts;
mod diacritics;

use tracing::debug;

/// Stage 1: remove page artifacts and normalize markdown structure.
pub fn clean_artifacts(text: &str) -> String {
    let result = artifacts::run_pipeline(text);
    debug!(
        input_len = text.len(),
        output_len = result.len(),
        "artifact cleanup complete"
    );
    result
}

/// Stage 2: fix line-break and OCR issues in diacritic-rich text.
pub fn clean_diacritics(text: &str) -> String {
    let result = diacritics::run_pipeline(text);
    debug!(
        input_len = text.len(),
        output_len = result.len(),
        "diacritic cleanup complete"
    );
    result
}

/// Run both normalization stages in order.
pub fn normalize(text: &str) -> String {
    clean_diacritics(&clean_artifacts(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_chains_both_stages() {
        let input = "# **Tiêu đề**\n\nTrang 1\n\nVăn bản tiếng Việt.Có lỗi khoảng cách.\n";
        let result = normalize(input);
        // Page marker dropped by stage 1, spacing fixed by stage 2.
        assert!(!result.contains("Trang 1"));
        assert!(result.contains("Việt. Có"));
        assert!(result.starts_with("# Tiêu đề"));
    }

    #[test]
    fn normalize_empty_input() {
        assert_eq!(normalize(""), "");
    }
}
