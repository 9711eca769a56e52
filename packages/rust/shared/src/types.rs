//! Core domain types for the NodeWeaver node pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version string recorded in `processing_info.pipeline_version`.
pub const PIPELINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sentinel domain when no domain table entry qualifies.
pub const UNKNOWN_DOMAIN: &str = "unknown";

// ---------------------------------------------------------------------------
// Token estimation
// ---------------------------------------------------------------------------

/// Estimate the token count of a text fragment.
///
/// A deliberately crude proxy, not a tokenizer: whitespace-normalized
/// character count divided by 4 (roughly one token per 4 characters for
/// Vietnamese and English alike), floored at 1. Every sizing decision in the
/// pipeline uses this same estimate so bounds stay consistent.
pub fn estimate_tokens(text: &str) -> usize {
    let mut chars = 0usize;
    let mut words = 0usize;
    for word in text.split_whitespace() {
        chars += word.chars().count();
        words += 1;
    }
    // Single spaces between words count toward the normalized length.
    let normalized_len = chars + words.saturating_sub(1);
    (normalized_len / 4).max(1)
}

/// Build a node identifier: `<doc_id>_node_<zero-padded index>`.
pub fn node_id(doc_id: &str, index: usize) -> String {
    format!("{doc_id}_node_{index:04}")
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Metadata attached to every node.
///
/// Serialized as an open mapping: optional keys are omitted when absent, and
/// consumers must not rely on their presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Owning document identifier.
    pub doc_id: String,
    /// 0-based position in the node sequence.
    pub node_index: usize,
    /// Estimated token count of the node content.
    pub token_estimate: usize,
    /// Topical tags, most relevant first, de-duplicated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Primary subject-area domain, or [`UNKNOWN_DOMAIN`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// IDs of the source nodes when this node was produced by a merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_from: Option<Vec<String>>,
}

/// A bounded-size, self-contained text fragment for downstream indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique within a document: `<doc_id>_node_<zero_padded_sequence>`.
    /// Provisional until the audit reindex pass.
    pub id: String,
    /// Trimmed, non-empty text. Never ends mid-sentence relative to the
    /// source (packer sentence-boundary rule).
    pub content: String,
    /// Heading the node was extracted under; empty for heading-less content.
    #[serde(default)]
    pub section: String,
    /// Node metadata (open mapping).
    pub metadata: NodeMetadata,
}

impl Node {
    /// Create a node with a freshly computed token estimate.
    ///
    /// The estimate is always derived from `content` here, never carried
    /// over, so merged or rebuilt nodes cannot hold a stale value.
    pub fn new(content: &str, section: &str, doc_id: &str, node_index: usize) -> Self {
        let content = content.trim().to_string();
        let token_estimate = estimate_tokens(&content);
        Self {
            id: node_id(doc_id, node_index),
            content,
            section: section.to_string(),
            metadata: NodeMetadata {
                doc_id: doc_id.to_string(),
                node_index,
                token_estimate,
                tags: None,
                domain: None,
                merged_from: None,
            },
        }
    }

    /// The current token estimate.
    pub fn token_estimate(&self) -> usize {
        self.metadata.token_estimate
    }
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// An intermediate segmenter output: one heading plus the raw text under it.
///
/// Produced once per document pass and consumed immediately by the packer;
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Trimmed heading text; empty for content before the first heading.
    pub heading: String,
    /// Heading depth (number of `#` markers), 0 if none.
    pub level: usize,
    /// Raw paragraph text under this heading.
    pub content: String,
}

// ---------------------------------------------------------------------------
// Stats blocks
// ---------------------------------------------------------------------------

/// Diagnostics from the packing stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkingStats {
    pub total_nodes: usize,
    pub min_tokens: usize,
    pub max_tokens: usize,
    pub avg_tokens: usize,
    /// Nodes whose single irreducible sentence exceeded `max_tokens`.
    pub oversized_nodes: usize,
}

/// Diagnostics from the audit stage. Never affects control flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditStats {
    pub original_count: usize,
    pub after_dedup: usize,
    pub after_merge: usize,
    pub final_count: usize,
    pub avg_tokens: f64,
    pub effective_min_tokens: usize,
    pub removed_invalid: usize,
}

/// Diagnostics from the tagging stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaggingStats {
    pub total_unique_tags: usize,
    pub unique_tags: Vec<String>,
    pub detected_domains: Vec<String>,
}

// ---------------------------------------------------------------------------
// DocumentRecord
// ---------------------------------------------------------------------------

/// Provenance and diagnostics for a processed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingInfo {
    /// Original source filename.
    pub source_file: String,
    /// SHA-256 hash of the input text.
    pub content_hash: String,
    /// When the pipeline ran.
    pub processed_at: DateTime<Utc>,
    /// Pipeline version string.
    pub pipeline_version: String,
    /// Final node count.
    pub total_nodes: usize,
    #[serde(default)]
    pub chunking_stats: ChunkingStats,
    #[serde(default)]
    pub audit_stats: AuditStats,
    #[serde(default)]
    pub tagging_stats: TaggingStats,
}

/// The persisted output artifact: one document's final node set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Document identifier derived from the source filename.
    pub doc_id: String,
    /// Final, reindexed node sequence.
    pub nodes: Vec<Node>,
    /// Provenance and per-stage statistics.
    pub processing_info: ProcessingInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_estimate_normalizes_whitespace() {
        // "mot hai ba" -> 10 chars incl. single separators -> 2 tokens
        assert_eq!(estimate_tokens("mot   hai \n\n ba"), 2);
        assert_eq!(estimate_tokens("mot hai ba"), 2);
    }

    #[test]
    fn token_estimate_counts_chars_not_bytes() {
        // 8 Vietnamese chars + 1 space = 9 normalized chars -> 2 tokens,
        // even though the UTF-8 byte length is far larger.
        assert_eq!(estimate_tokens("bệnh nhân"), 2);
    }

    #[test]
    fn token_estimate_floors_at_one() {
        assert_eq!(estimate_tokens(""), 1);
        assert_eq!(estimate_tokens("ab"), 1);
    }

    #[test]
    fn node_id_zero_pads_to_four() {
        assert_eq!(node_id("doc", 7), "doc_node_0007");
        assert_eq!(node_id("doc", 12345), "doc_node_12345");
    }

    #[test]
    fn node_new_trims_and_estimates() {
        let node = Node::new("  some content here  ", "Intro", "doc", 3);
        assert_eq!(node.content, "some content here");
        assert_eq!(node.id, "doc_node_0003");
        assert_eq!(node.metadata.node_index, 3);
        assert_eq!(node.token_estimate(), estimate_tokens("some content here"));
        assert!(node.metadata.tags.is_none());
    }

    #[test]
    fn metadata_optional_keys_omitted() {
        let node = Node::new("text", "", "doc", 0);
        let json = serde_json::to_string(&node).expect("serialize");
        assert!(!json.contains("tags"));
        assert!(!json.contains("merged_from"));

        let mut tagged = node.clone();
        tagged.metadata.tags = Some(vec!["Tim mạch".into()]);
        let json = serde_json::to_string(&tagged).expect("serialize");
        assert!(json.contains("tags"));
    }

    #[test]
    fn record_roundtrip() {
        let record = DocumentRecord {
            doc_id: "doc".into(),
            nodes: vec![Node::new("content body", "Intro", "doc", 0)],
            processing_info: ProcessingInfo {
                source_file: "doc.pdf".into(),
                content_hash: "abc123".into(),
                processed_at: Utc::now(),
                pipeline_version: PIPELINE_VERSION.into(),
                total_nodes: 1,
                chunking_stats: ChunkingStats::default(),
                audit_stats: AuditStats::default(),
                tagging_stats: TaggingStats::default(),
            },
        };

        let json = serde_json::to_string_pretty(&record).expect("serialize");
        let parsed: DocumentRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.doc_id, "doc");
        assert_eq!(parsed.nodes.len(), 1);
        assert_eq!(parsed.processing_info.total_nodes, 1);
    }
}
