//! End-to-end document pipeline: raw text → normalize → pack → audit →
//! classify → record.

use std::path::Path;
use std::sync::LazyLock;
use std::time::Instant;

use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::{info, instrument};

use nodeweaver_shared::{
    DocumentRecord, NodeWeaverError, PIPELINE_VERSION, PipelineConfig, ProcessingInfo, Result,
    TaggingStats,
};

use crate::{auditor, classifier, packer};

static DOC_ID_SANITIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\-]+").expect("valid regex"));

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each node is classified.
    fn node_classified(&self, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, record: &DocumentRecord);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn node_classified(&self, _current: usize, _total: usize) {}
    fn done(&self, _record: &DocumentRecord) {}
}

/// Derive a document id from the source filename: the stem with every run
/// of non-word characters replaced by an underscore.
pub fn doc_id_from_source(source_file: &str) -> String {
    let stem = Path::new(source_file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source_file);
    DOC_ID_SANITIZE.replace_all(stem, "_").into_owned()
}

fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Run the full pipeline over one document.
///
/// 1. Normalize text (artifact and diacritic repair)
/// 2. Segment and pack into token-budgeted nodes
/// 3. Audit: dedup, merge, validate, reindex
/// 4. Classify: tags and domain per node
///
/// An empty or whitespace-only input is a validation error; a document that
/// legitimately yields zero nodes after auditing is not.
#[instrument(skip_all, fields(source = %source_file))]
pub fn process_document(
    raw_text: &str,
    source_file: &str,
    config: &PipelineConfig,
    progress: &dyn ProgressReporter,
) -> Result<DocumentRecord> {
    config.validate()?;
    if raw_text.trim().is_empty() {
        return Err(NodeWeaverError::missing_field("content", "pipeline"));
    }

    let start = Instant::now();
    let doc_id = doc_id_from_source(source_file);
    let hash = content_hash(raw_text);
    info!(%doc_id, bytes = raw_text.len(), "starting document pipeline");

    // --- Phase 1: Normalize ---
    progress.phase("Normalizing text");
    let cleaned = nodeweaver_cleanup::normalize(raw_text);

    // --- Phase 2: Segment & pack ---
    progress.phase("Segmenting and packing");
    let (nodes, chunking_stats) =
        packer::pack_document(&cleaned, &doc_id, config.min_tokens, config.max_tokens);

    // --- Phase 3: Audit ---
    progress.phase("Auditing nodes");
    let (mut nodes, audit_stats) = auditor::audit(
        nodes,
        &doc_id,
        config.duplicate_threshold,
        config.min_tokens,
    );

    // --- Phase 4: Classify ---
    progress.phase("Classifying nodes");
    let total = nodes.len();
    for (i, node) in nodes.iter_mut().enumerate() {
        let (tags, domain) =
            classifier::classify(&node.content, &node.section, source_file, config.max_tags);
        node.metadata.tags = Some(tags);
        node.metadata.domain = Some(domain);
        progress.node_classified(i + 1, total);
    }
    let tagging_stats = tagging_stats(&nodes);

    let record = DocumentRecord {
        doc_id,
        nodes,
        processing_info: ProcessingInfo {
            source_file: source_file.to_string(),
            content_hash: hash,
            processed_at: chrono::Utc::now(),
            pipeline_version: PIPELINE_VERSION.to_string(),
            total_nodes: audit_stats.final_count,
            chunking_stats,
            audit_stats,
            tagging_stats,
        },
    };

    progress.done(&record);
    info!(
        doc_id = %record.doc_id,
        nodes = record.nodes.len(),
        unique_tags = record.processing_info.tagging_stats.total_unique_tags,
        elapsed_ms = start.elapsed().as_millis(),
        "document pipeline complete"
    );

    Ok(record)
}

fn tagging_stats(nodes: &[nodeweaver_shared::Node]) -> TaggingStats {
    let mut tags: Vec<String> = nodes
        .iter()
        .filter_map(|n| n.metadata.tags.as_deref())
        .flatten()
        .cloned()
        .collect();
    tags.sort_unstable();
    tags.dedup();

    let mut domains: Vec<String> = nodes
        .iter()
        .filter_map(|n| n.metadata.domain.clone())
        .collect();
    domains.sort_unstable();
    domains.dedup();

    TaggingStats {
        total_unique_tags: tags.len(),
        unique_tags: tags,
        detected_domains: domains,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig {
            min_tokens: 10,
            max_tokens: 400,
            duplicate_threshold: 0.85,
            max_tags: 10,
        }
    }

    const DOC: &str = "# Tim mạch\n\nBệnh tim mạch cần được chẩn đoán sớm bằng điện tâm đồ \
         và siêu âm tim. Bác sĩ điều trị bệnh nhân tim mạch tại bệnh viện, theo dõi \
         huyết áp và nhịp tim trong suốt quá trình điều trị nội trú kéo dài.";

    #[test]
    fn doc_id_sanitizes_stem() {
        assert_eq!(doc_id_from_source("Phác đồ 2024.pdf"), "Phác_đồ_2024");
        assert_eq!(doc_id_from_source("notes/bài giảng.txt"), "bài_giảng");
        assert_eq!(doc_id_from_source("clean-name.md"), "clean-name");
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = process_document("   \n  ", "a.txt", &config(), &SilentProgress)
            .expect_err("empty input");
        assert!(matches!(err, NodeWeaverError::Validation { .. }));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = config();
        cfg.min_tokens = 500; // above max_tokens
        let err = process_document(DOC, "a.txt", &cfg, &SilentProgress).expect_err("bad config");
        assert!(matches!(err, NodeWeaverError::Validation { .. }));
    }

    #[test]
    fn full_run_produces_classified_record() {
        let record = process_document(DOC, "benh_tim_mach.pdf", &config(), &SilentProgress)
            .expect("pipeline");
        assert_eq!(record.doc_id, "benh_tim_mach");
        assert!(!record.nodes.is_empty());
        assert_eq!(record.processing_info.total_nodes, record.nodes.len());
        assert_eq!(record.processing_info.pipeline_version, PIPELINE_VERSION);

        let node = &record.nodes[0];
        assert_eq!(node.id, "benh_tim_mach_node_0000");
        assert_eq!(node.section, "Tim mạch");
        assert_eq!(node.metadata.domain.as_deref(), Some("Y học"));
        assert!(node.metadata.tags.as_ref().is_some_and(|t| !t.is_empty()));
    }

    #[test]
    fn stats_aggregate_across_nodes() {
        let record = process_document(DOC, "benh_tim_mach.pdf", &config(), &SilentProgress)
            .expect("pipeline");
        let stats = &record.processing_info.tagging_stats;
        assert_eq!(stats.total_unique_tags, stats.unique_tags.len());
        assert_eq!(stats.detected_domains, vec!["Y học".to_string()]);
        assert!(record.processing_info.audit_stats.original_count >= record.nodes.len());
    }

    #[test]
    fn content_hash_is_stable_hex() {
        let record = process_document(DOC, "a.txt", &config(), &SilentProgress).expect("pipeline");
        assert_eq!(record.processing_info.content_hash.len(), 64);
        assert_eq!(record.processing_info.content_hash, content_hash(DOC));
    }

    #[test]
    fn processed_records_roundtrip_json() {
        let record = process_document(DOC, "a.txt", &config(), &SilentProgress).expect("pipeline");
        let json = serde_json::to_string(&record).expect("serialize");
        let back: DocumentRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.doc_id, record.doc_id);
        assert_eq!(back.nodes.len(), record.nodes.len());
    }
}
