//! Token-budgeted greedy packing of section content into nodes.
//!
//! Paragraphs are accumulated until the budget would overflow; an oversized
//! paragraph degrades to sentence-level packing. Sentences are never split:
//! a single sentence above `max_tokens` is emitted as-is (irreducible).

use tracing::debug;

use nodeweaver_shared::{ChunkingStats, Node, estimate_tokens};

use crate::segmenter;

/// Pack one section's content into nodes within `[min_tokens, max_tokens]`.
///
/// Returns the nodes in source order plus the next free node index. Node ids
/// are provisional; the auditor reindexes survivors. `min_tokens` is a soft
/// target: content is never dropped to satisfy it, so a section with any
/// content always yields at least one node.
pub fn pack(
    section_content: &str,
    heading: &str,
    doc_id: &str,
    start_index: usize,
    min_tokens: usize,
    max_tokens: usize,
) -> (Vec<Node>, usize) {
    let paragraphs = segmenter::split_paragraphs(section_content);

    let mut nodes: Vec<Node> = Vec::new();
    let mut index = start_index;

    // Accumulator: paragraphs waiting to be flushed as one node.
    let mut acc: Vec<String> = Vec::new();
    let mut acc_tokens = 0usize;

    for paragraph in paragraphs {
        let para_tokens = estimate_tokens(&paragraph);

        if para_tokens > max_tokens {
            // Oversized paragraph: flush what we have, then degrade to
            // sentence-level packing for this paragraph alone.
            if !acc.is_empty() {
                nodes.push(Node::new(&acc.join("\n\n"), heading, doc_id, index));
                index += 1;
                acc.clear();
                acc_tokens = 0;
            }

            let mut buffer: Vec<String> = Vec::new();
            let mut buffer_tokens = 0usize;

            for sentence in segmenter::split_sentences(&paragraph) {
                let sent_tokens = estimate_tokens(&sentence);

                // Flush before the sentence that would overflow; it starts
                // the next buffer instead.
                if buffer_tokens + sent_tokens > max_tokens && !buffer.is_empty() {
                    nodes.push(Node::new(&buffer.join(" "), heading, doc_id, index));
                    index += 1;
                    buffer = vec![sentence];
                    buffer_tokens = sent_tokens;
                } else {
                    buffer.push(sentence);
                    buffer_tokens += sent_tokens;
                }
            }

            if !buffer.is_empty() {
                let remaining = buffer.join(" ");
                if estimate_tokens(&remaining) >= min_tokens {
                    nodes.push(Node::new(&remaining, heading, doc_id, index));
                    index += 1;
                } else {
                    // Undersized sentence remainder seeds the next
                    // accumulation cycle instead of becoming a short node.
                    acc_tokens = estimate_tokens(&remaining);
                    acc = vec![remaining];
                }
            }
        } else if acc_tokens + para_tokens > max_tokens {
            if !acc.is_empty() {
                nodes.push(Node::new(&acc.join("\n\n"), heading, doc_id, index));
                index += 1;
            }
            acc = vec![paragraph];
            acc_tokens = para_tokens;
        } else {
            acc.push(paragraph);
            acc_tokens += para_tokens;
        }
    }

    // Tail: emit, merge into the previous node, or emit undersized if it is
    // all the section has.
    if !acc.is_empty() {
        let remaining = acc.join("\n\n");
        if estimate_tokens(&remaining) >= min_tokens {
            nodes.push(Node::new(&remaining, heading, doc_id, index));
            index += 1;
        } else if let Some(prev) = nodes.last_mut() {
            let merged = format!("{}\n\n{remaining}", prev.content);
            *prev = Node::new(&merged, &prev.section.clone(), doc_id, prev.metadata.node_index);
        } else {
            nodes.push(Node::new(&remaining, heading, doc_id, index));
            index += 1;
        }
    }

    (nodes, index)
}

/// Pack a whole document: segment into sections and pack each in order.
///
/// If no heading produced any node and the document is non-empty, the whole
/// text is packed as a single heading-less section.
pub fn pack_document(
    content: &str,
    doc_id: &str,
    min_tokens: usize,
    max_tokens: usize,
) -> (Vec<Node>, ChunkingStats) {
    let sections = segmenter::segment(content);

    let mut nodes: Vec<Node> = Vec::new();
    let mut index = 0usize;

    for section in &sections {
        if section.content.trim().is_empty() {
            continue;
        }
        let (section_nodes, next_index) = pack(
            &section.content,
            &section.heading,
            doc_id,
            index,
            min_tokens,
            max_tokens,
        );
        nodes.extend(section_nodes);
        index = next_index;
    }

    if nodes.is_empty() && !content.trim().is_empty() {
        let (fallback, _) = pack(content, "", doc_id, 0, min_tokens, max_tokens);
        nodes = fallback;
    }

    let stats = chunking_stats(&nodes, min_tokens, max_tokens);
    debug!(
        sections = sections.len(),
        nodes = stats.total_nodes,
        avg_tokens = stats.avg_tokens,
        oversized = stats.oversized_nodes,
        "document packed"
    );

    (nodes, stats)
}

fn chunking_stats(nodes: &[Node], min_tokens: usize, max_tokens: usize) -> ChunkingStats {
    let total: usize = nodes.iter().map(Node::token_estimate).sum();
    ChunkingStats {
        total_nodes: nodes.len(),
        min_tokens,
        max_tokens,
        avg_tokens: total / nodes.len().max(1),
        oversized_nodes: nodes
            .iter()
            .filter(|n| n.token_estimate() > max_tokens)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A sentence of roughly `tokens` estimated tokens ending with a period.
    fn sentence(word: &str, tokens: usize) -> String {
        // Each "word " contributes 5 normalized chars; 4 chars per token.
        let count = (tokens * 4) / (word.chars().count() + 1);
        let mut s = vec![word; count.max(1)].join(" ");
        s.push('.');
        s
    }

    #[test]
    fn small_section_packs_to_single_node() {
        let (nodes, next) = pack("Đoạn một.\n\nĐoạn hai.", "Giới thiệu", "doc", 0, 1, 400);
        assert_eq!(nodes.len(), 1);
        assert_eq!(next, 1);
        assert_eq!(nodes[0].content, "Đoạn một.\n\nĐoạn hai.");
        assert_eq!(nodes[0].section, "Giới thiệu");
        assert_eq!(nodes[0].id, "doc_node_0000");
    }

    #[test]
    fn sole_undersized_content_still_emitted() {
        // min_tokens far above the content size — content is never dropped.
        let (nodes, _) = pack("Short para.", "Intro", "doc", 0, 150, 400);
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].token_estimate() < 150);
    }

    #[test]
    fn paragraphs_flushed_before_overflow() {
        let p1 = sentence("alpha", 200);
        let p2 = sentence("bravo", 200);
        let p3 = sentence("delta", 150);
        let content = format!("{p1}\n\n{p2}\n\n{p3}");
        let (nodes, next) = pack(&content, "S", "doc", 0, 50, 350);
        // p1+p2 would exceed 350, so p1 flushes alone; p2+p3 fit together.
        assert_eq!(nodes.len(), 2);
        assert_eq!(next, 2);
        assert!(nodes.iter().all(|n| n.token_estimate() <= 350));
        assert!(nodes[1].content.contains("bravo"));
        assert!(nodes[1].content.contains("delta"));
    }

    #[test]
    fn oversized_paragraph_splits_at_sentences() {
        // One paragraph of five ~100-token sentences, max 400: must split
        // into >= 2 nodes, all within the bound.
        let sentences: Vec<String> = ["mot", "hai", "ba", "bon", "nam"]
            .iter()
            .map(|w| sentence(w, 100))
            .collect();
        let paragraph = sentences.join(" ");
        assert!(estimate_tokens(&paragraph) > 400);

        let (nodes, _) = pack(&paragraph, "S", "doc", 0, 50, 400);
        assert!(nodes.len() >= 2);
        for node in &nodes {
            assert!(node.token_estimate() <= 400, "node over budget");
            // Sentence integrity: every node ends at a sentence boundary.
            assert!(node.content.ends_with('.'));
        }
        // No content loss.
        let rejoined = nodes
            .iter()
            .map(|n| n.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        for s in &sentences {
            assert!(rejoined.contains(s.as_str()));
        }
    }

    #[test]
    fn irreducible_sentence_emitted_oversized() {
        let giant = sentence("от", 500); // single sentence, no boundaries
        let (nodes, _) = pack(&giant, "S", "doc", 0, 50, 400);
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].token_estimate() > 400);
    }

    #[test]
    fn sentence_remainder_seeds_next_cycle() {
        // Oversized paragraph leaves a small sentence remainder, followed by
        // a small paragraph: both end up in the same trailing node.
        let big = format!("{} {}", sentence("alpha", 380), sentence("tail", 30));
        let content = format!("{big}\n\nFollow-up paragraph here.");
        let (nodes, _) = pack(&content, "S", "doc", 0, 50, 400);
        let last = nodes.last().expect("nodes");
        assert!(last.content.contains("tail"));
        assert!(last.content.contains("Follow-up"));
    }

    #[test]
    fn undersized_tail_merges_into_previous() {
        let p1 = sentence("alpha", 350);
        let content = format!("{p1}\n\nNgắn.");
        let (nodes, next) = pack(&content, "S", "doc", 0, 100, 400);
        assert_eq!(nodes.len(), 1);
        assert_eq!(next, 1);
        assert!(nodes[0].content.contains("Ngắn."));
        // Estimate recomputed after the merge.
        assert_eq!(nodes[0].token_estimate(), estimate_tokens(&nodes[0].content));
    }

    #[test]
    fn provisional_indexes_sequential_from_start() {
        let p = sentence("word", 200);
        let content = format!("{p}\n\n{p}\n\n{p}");
        let (nodes, next) = pack(&content, "S", "doc", 5, 50, 250);
        assert_eq!(next, 5 + nodes.len());
        for (offset, node) in nodes.iter().enumerate() {
            assert_eq!(node.metadata.node_index, 5 + offset);
        }
    }

    #[test]
    fn document_without_headings_packs_as_one_section() {
        let (nodes, stats) = pack_document("Chỉ có văn bản thuần túy ở đây.", "doc", 10, 400);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].section, "");
        assert_eq!(stats.total_nodes, 1);
    }

    #[test]
    fn empty_document_produces_no_nodes() {
        let (nodes, stats) = pack_document("   \n\n  ", "doc", 10, 400);
        assert!(nodes.is_empty());
        assert_eq!(stats.total_nodes, 0);
        assert_eq!(stats.oversized_nodes, 0);
    }

    #[test]
    fn scenario_short_intro_not_discarded() {
        let (nodes, stats) = pack_document("# Intro\n\nShort para.", "doc", 150, 400);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].section, "Intro");
        assert_eq!(stats.oversized_nodes, 0);
    }
}
