//! Post-packing quality control: dedup, merge, validate, reindex.
//!
//! Thresholds adapt to small documents so a short source does not lose all
//! of its nodes to a fixed minimum.

use tracing::debug;

use nodeweaver_shared::{AuditStats, Node, estimate_tokens, node_id};

/// Lowercased, punctuation-free word forms for similarity comparison.
fn comparison_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric() || *c == '_')
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Jaccard similarity over normalized word sets, in `[0.0, 1.0]`.
///
/// Two empty texts are identical (1.0); one empty side shares nothing (0.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let words_a: std::collections::HashSet<String> = comparison_words(a).into_iter().collect();
    let words_b: std::collections::HashSet<String> = comparison_words(b).into_iter().collect();

    if words_a.is_empty() && words_b.is_empty() {
        return 1.0;
    }
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f64 / union as f64
}

/// Drop near-duplicates, keeping the longer variant in the position where
/// the pair was first seen. Ties keep the earlier node.
fn remove_duplicates(nodes: Vec<Node>, threshold: f64) -> Vec<Node> {
    let mut unique: Vec<Node> = Vec::new();
    'nodes: for node in nodes {
        for kept in unique.iter_mut() {
            if similarity(&node.content, &kept.content) >= threshold {
                if node.content.chars().count() > kept.content.chars().count() {
                    *kept = node;
                }
                continue 'nodes;
            }
        }
        unique.push(node);
    }
    unique
}

/// Fold runs of undersized same-section neighbors into single nodes,
/// recording every absorbed id in `merged_from`. A node that is itself a
/// merge product contributes its whole lineage, not just its current id.
fn merge_short_neighbors(nodes: Vec<Node>, effective_min: usize) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::new();
    let mut i = 0;
    while i < nodes.len() {
        let mut current = nodes[i].clone();
        let mut sources = current
            .metadata
            .merged_from
            .take()
            .unwrap_or_else(|| vec![current.id.clone()]);

        while i + 1 < nodes.len()
            && current.section == nodes[i + 1].section
            && current.token_estimate() < effective_min
        {
            let next = &nodes[i + 1];
            match &next.metadata.merged_from {
                Some(chain) => sources.extend(chain.iter().cloned()),
                None => sources.push(next.id.clone()),
            }
            let combined = format!("{}\n\n{}", current.content, next.content);
            let mut node = Node::new(
                &combined,
                &current.section,
                &current.metadata.doc_id,
                current.metadata.node_index,
            );
            node.id = current.id.clone();
            current = node;
            i += 1;
        }

        if sources.len() > 1 {
            current.metadata.merged_from = Some(sources);
        }
        merged.push(current);
        i += 1;
    }
    merged
}

fn adaptive_min(nodes: &[Node], min_tokens: usize) -> usize {
    let total: usize = nodes.iter().map(Node::token_estimate).sum();
    let mean = total as f64 / nodes.len() as f64;
    min_tokens.min((mean * 0.5) as usize).max(10)
}

fn drop_invalid(nodes: Vec<Node>, effective_min: usize, removed: &mut usize) -> Vec<Node> {
    nodes
        .into_iter()
        .filter(|node| {
            let text = node.content.trim();
            if text.is_empty() || estimate_tokens(text) < effective_min {
                *removed += 1;
                false
            } else {
                true
            }
        })
        .collect()
}

/// Run the full audit over a packed node sequence.
///
/// Steps, in order: near-duplicate removal, short-neighbor merge, adaptive
/// validation, reindex. The effective minimum starts at
/// `max(10, min(min_tokens, avg / 2))` over the incoming estimates, so small
/// documents keep their content. Merging raises the surviving mean, which can
/// raise that minimum in turn, so merge and validation repeat under the
/// recomputed minimum until the set is stable — auditing an audit's output
/// again changes nothing. Survivors get fresh sequential ids; metadata is
/// rebuilt except for `merged_from` lineage, which is carried through.
pub fn audit(nodes: Vec<Node>, doc_id: &str, duplicate_threshold: f64, min_tokens: usize) -> (Vec<Node>, AuditStats) {
    let original_count = nodes.len();
    if original_count == 0 {
        return (nodes, AuditStats::default());
    }

    let total_tokens: usize = nodes.iter().map(Node::token_estimate).sum();
    let avg_tokens = total_tokens as f64 / original_count as f64;
    let mut effective_min = adaptive_min(&nodes, min_tokens);

    let nodes = remove_duplicates(nodes, duplicate_threshold);
    let after_dedup = nodes.len();

    let mut nodes = merge_short_neighbors(nodes, effective_min);
    let after_merge = nodes.len();

    let mut removed_invalid = 0usize;
    nodes = drop_invalid(nodes, effective_min, &mut removed_invalid);

    while !nodes.is_empty() {
        let next_min = adaptive_min(&nodes, min_tokens);
        if next_min <= effective_min {
            break;
        }
        effective_min = next_min;
        nodes = merge_short_neighbors(nodes, effective_min);
        nodes = drop_invalid(nodes, effective_min, &mut removed_invalid);
    }

    let mut reindexed: Vec<Node> = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.into_iter().enumerate() {
        let mut fresh = Node::new(&node.content, &node.section, doc_id, index);
        fresh.metadata.merged_from = node.metadata.merged_from;
        debug_assert_eq!(fresh.id, node_id(doc_id, index));
        reindexed.push(fresh);
    }

    let stats = AuditStats {
        original_count,
        after_dedup,
        after_merge,
        final_count: reindexed.len(),
        avg_tokens: (avg_tokens * 100.0).round() / 100.0,
        effective_min_tokens: effective_min,
        removed_invalid,
    };
    debug!(
        original = stats.original_count,
        after_dedup = stats.after_dedup,
        after_merge = stats.after_merge,
        final_count = stats.final_count,
        effective_min_tokens = stats.effective_min_tokens,
        "audit complete"
    );

    (reindexed, stats)
}
