//! Review and training exports for processed document records.
//!
//! Each renderer is a pure `DocumentRecord -> String` function; file writing
//! lives in [`write_export`] and [`write_record`] so renders stay testable
//! without touching disk.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use nodeweaver_shared::{DocumentRecord, NodeWeaverError, Result};

/// Available export renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Content only, for quick review.
    Plain,
    /// Content with full metadata in framed blocks.
    Detailed,
    /// `<TEXT>` sample blocks with metadata comments.
    Training,
    /// Markdown document for sharing and review.
    Markdown,
    /// One JSON object per node, for ML pipelines.
    Jsonl,
}

impl ExportFormat {
    /// Filename suffix appended to the document id.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Plain => "_plain.txt",
            Self::Detailed => "_detailed.txt",
            Self::Training => "_training.txt",
            Self::Markdown => "_review.md",
            Self::Jsonl => "_training.jsonl",
        }
    }

    /// Render `record` in this format.
    pub fn render(self, record: &DocumentRecord) -> String {
        match self {
            Self::Plain => render_plain(record),
            Self::Detailed => render_detailed(record),
            Self::Training => render_training(record),
            Self::Markdown => render_markdown(record),
            Self::Jsonl => render_jsonl(record),
        }
    }
}

/// Content-only rendering with section markers.
pub fn render_plain(record: &DocumentRecord) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("# Document: {}", record.doc_id));
    lines.push(format!("# Nodes: {}", record.nodes.len()));
    lines.push("=".repeat(80));
    lines.push(String::new());

    for node in &record.nodes {
        if !node.section.is_empty() {
            lines.push(format!("[{}]", node.section));
            lines.push(String::new());
        }
        lines.push(node.content.clone());
        lines.push(String::new());
        lines.push("-".repeat(40));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Full-metadata rendering with one framed block per node.
pub fn render_detailed(record: &DocumentRecord) -> String {
    let info = &record.processing_info;
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(80));
    lines.push("DOCUMENT EXPORT - DETAILED VIEW".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());
    lines.push(format!("Document ID    : {}", record.doc_id));
    lines.push(format!("Source File    : {}", info.source_file));
    lines.push(format!("Processed At   : {}", info.processed_at.to_rfc3339()));
    lines.push(format!("Total Nodes    : {}", record.nodes.len()));
    lines.push(format!(
        "Unique Tags    : {}",
        info.tagging_stats.total_unique_tags
    ));
    if !info.tagging_stats.detected_domains.is_empty() {
        lines.push(format!(
            "Domains        : {}",
            info.tagging_stats.detected_domains.join(", ")
        ));
    }
    lines.push(String::new());
    lines.push("=".repeat(80));
    lines.push(String::new());

    for (i, node) in record.nodes.iter().enumerate() {
        lines.push(format!("┌{}┐", "─".repeat(78)));
        lines.push(format!("│ NODE {}: {}", i + 1, node.id));
        lines.push(format!("├{}┤", "─".repeat(78)));
        if !node.section.is_empty() {
            lines.push(format!("│ Section : {}", node.section));
        }
        if let Some(domain) = &node.metadata.domain {
            lines.push(format!("│ Domain  : {domain}"));
        }
        if let Some(tags) = &node.metadata.tags {
            if !tags.is_empty() {
                lines.push(format!("│ Tags    : {}", tags.join(", ")));
            }
        }
        lines.push(format!("│ Tokens  : ~{}", node.metadata.token_estimate));
        lines.push(format!("├{}┤", "─".repeat(78)));
        lines.push("│ CONTENT:".to_string());
        lines.push("│".to_string());
        for line in node.content.lines() {
            let wrapped: String = line.chars().take(76).collect();
            lines.push(format!("│ {wrapped}"));
        }
        lines.push(format!("└{}┘", "─".repeat(78)));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Sample-block rendering for training datasets.
pub fn render_training(record: &DocumentRecord) -> String {
    let info = &record.processing_info;
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Training Data Export".to_string());
    lines.push(format!("# Document: {}", record.doc_id));
    lines.push(format!("# Source: {}", info.source_file));
    lines.push(format!("# Nodes: {}", record.nodes.len()));
    lines.push(format!("# Export Date: {}", chrono::Utc::now().to_rfc3339()));
    lines.push("#".to_string());
    lines.push("# Format: Each <TEXT> block is a training sample".to_string());
    lines.push(format!("#{}", "=".repeat(77)));
    lines.push(String::new());

    for (i, node) in record.nodes.iter().enumerate() {
        lines.push(format!("# --- Sample {} ---", i + 1));
        if let Some(domain) = &node.metadata.domain {
            lines.push(format!("# Domain: {domain}"));
        }
        if let Some(tags) = &node.metadata.tags {
            if !tags.is_empty() {
                lines.push(format!("# Tags: {}", tags.join(", ")));
            }
        }
        if !node.section.is_empty() {
            lines.push(format!("# Section: {}", node.section));
        }
        lines.push("<TEXT>".to_string());
        lines.push(node.content.trim().to_string());
        lines.push("</TEXT>".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Markdown rendering with a metadata table and blockquoted content.
pub fn render_markdown(record: &DocumentRecord) -> String {
    let info = &record.processing_info;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {}", record.doc_id));
    lines.push(String::new());
    lines.push("## Document Info".to_string());
    lines.push(String::new());
    lines.push("| Property | Value |".to_string());
    lines.push("|----------|-------|".to_string());
    lines.push(format!("| Source File | `{}` |", info.source_file));
    lines.push(format!("| Total Nodes | {} |", record.nodes.len()));
    lines.push(format!("| Processed At | {} |", info.processed_at.to_rfc3339()));
    if !info.tagging_stats.detected_domains.is_empty() {
        lines.push(format!(
            "| Domains | {} |",
            info.tagging_stats.detected_domains.join(", ")
        ));
    }
    lines.push(format!(
        "| Unique Tags | {} |",
        info.tagging_stats.total_unique_tags
    ));
    lines.push(String::new());

    if !info.tagging_stats.unique_tags.is_empty() {
        lines.push("## Tags".to_string());
        lines.push(String::new());
        for tag in &info.tagging_stats.unique_tags {
            lines.push(format!("- {tag}"));
        }
        lines.push(String::new());
    }

    lines.push("## Content".to_string());
    lines.push(String::new());

    let mut current_section: Option<&str> = None;
    for (i, node) in record.nodes.iter().enumerate() {
        if !node.section.is_empty() && current_section != Some(node.section.as_str()) {
            lines.push(format!("### {}", node.section));
            lines.push(String::new());
            current_section = Some(node.section.as_str());
        }

        lines.push(format!("**Node {}**", i + 1));
        if let Some(domain) = &node.metadata.domain {
            lines.push(format!("- Domain: `{domain}`"));
        }
        if let Some(tags) = &node.metadata.tags {
            if !tags.is_empty() {
                let ticked: Vec<String> = tags.iter().map(|t| format!("`{t}`")).collect();
                lines.push(format!("- Tags: {}", ticked.join(", ")));
            }
        }
        lines.push(String::new());
        lines.push(format!("> {}", node.content.replace('\n', "\n> ")));
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// One training sample per line.
#[derive(Serialize)]
struct JsonlSample<'a> {
    id: &'a str,
    text: &'a str,
    section: &'a str,
    domain: &'a str,
    tags: &'a [String],
    source: &'a str,
    doc_id: &'a str,
}

/// JSON Lines rendering: one flattened sample object per node.
pub fn render_jsonl(record: &DocumentRecord) -> String {
    let mut out = String::new();
    for node in &record.nodes {
        let sample = JsonlSample {
            id: &node.id,
            text: &node.content,
            section: &node.section,
            domain: node.metadata.domain.as_deref().unwrap_or(""),
            tags: node.metadata.tags.as_deref().unwrap_or(&[]),
            source: &record.processing_info.source_file,
            doc_id: &record.doc_id,
        };
        // Serialization of these flat string fields cannot fail.
        let line = serde_json::to_string(&sample)
            .unwrap_or_else(|_| String::from("{}"));
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Load a previously written JSON record from disk.
pub fn load_record(path: &Path) -> Result<DocumentRecord> {
    let json = std::fs::read_to_string(path).map_err(|e| NodeWeaverError::io(path, e))?;
    serde_json::from_str(&json).map_err(|e| {
        NodeWeaverError::parse(format!("{} is not a processed record: {e}", path.display()))
    })
}

/// Render `record` and write it under `output_dir`, creating the directory
/// if needed. Returns the written path.
pub fn write_export(
    record: &DocumentRecord,
    output_dir: &Path,
    format: ExportFormat,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).map_err(|e| NodeWeaverError::io(output_dir, e))?;

    let path = output_dir.join(format!("{}{}", record.doc_id, format.suffix()));
    let rendered = format.render(record);
    std::fs::write(&path, rendered).map_err(|e| NodeWeaverError::io(&path, e))?;

    info!(path = %path.display(), format = ?format, "export written");
    Ok(path)
}

/// Write the canonical JSON record (`<doc_id>.json`) under `output_dir`.
pub fn write_record(record: &DocumentRecord, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).map_err(|e| NodeWeaverError::io(output_dir, e))?;

    let path = output_dir.join(format!("{}.json", record.doc_id));
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| NodeWeaverError::Export(format!("serialize record: {e}")))?;
    std::fs::write(&path, json).map_err(|e| NodeWeaverError::io(&path, e))?;

    info!(path = %path.display(), nodes = record.nodes.len(), "record written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeweaver_shared::{
        AuditStats, ChunkingStats, Node, PIPELINE_VERSION, ProcessingInfo, TaggingStats,
    };

    fn record() -> DocumentRecord {
        let mut node = Node::new("Nội dung về tim mạch.", "Tim mạch", "doc", 0);
        node.metadata.tags = Some(vec!["Tim mạch".to_string()]);
        node.metadata.domain = Some("Y học".to_string());

        DocumentRecord {
            doc_id: "doc".to_string(),
            nodes: vec![node],
            processing_info: ProcessingInfo {
                source_file: "doc.pdf".to_string(),
                content_hash: "0".repeat(64),
                processed_at: chrono::Utc::now(),
                pipeline_version: PIPELINE_VERSION.to_string(),
                total_nodes: 1,
                chunking_stats: ChunkingStats::default(),
                audit_stats: AuditStats::default(),
                tagging_stats: TaggingStats {
                    total_unique_tags: 1,
                    unique_tags: vec!["Tim mạch".to_string()],
                    detected_domains: vec!["Y học".to_string()],
                },
            },
        }
    }

    #[test]
    fn plain_contains_section_and_content() {
        let out = render_plain(&record());
        assert!(out.contains("# Document: doc"));
        assert!(out.contains("[Tim mạch]"));
        assert!(out.contains("Nội dung về tim mạch."));
    }

    #[test]
    fn detailed_lists_metadata() {
        let out = render_detailed(&record());
        assert!(out.contains("NODE 1: doc_node_0000"));
        assert!(out.contains("Domain  : Y học"));
        assert!(out.contains("Tags    : Tim mạch"));
    }

    #[test]
    fn training_wraps_samples_in_text_blocks() {
        let out = render_training(&record());
        assert!(out.contains("<TEXT>\nNội dung về tim mạch.\n</TEXT>"));
        assert!(out.contains("# Domain: Y học"));
    }

    #[test]
    fn markdown_groups_by_section() {
        let out = render_markdown(&record());
        assert!(out.contains("### Tim mạch"));
        assert!(out.contains("> Nội dung về tim mạch."));
        assert!(out.contains("| Domains | Y học |"));
    }

    #[test]
    fn jsonl_emits_one_object_per_node() {
        let out = render_jsonl(&record());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(lines[0]).expect("valid json");
        assert_eq!(value["id"], "doc_node_0000");
        assert_eq!(value["domain"], "Y học");
        assert_eq!(value["doc_id"], "doc");
    }

    #[test]
    fn suffixes_are_distinct() {
        let formats = [
            ExportFormat::Plain,
            ExportFormat::Detailed,
            ExportFormat::Training,
            ExportFormat::Markdown,
            ExportFormat::Jsonl,
        ];
        let suffixes: std::collections::HashSet<&str> =
            formats.iter().map(|f| f.suffix()).collect();
        assert_eq!(suffixes.len(), formats.len());
    }

    #[test]
    fn write_helpers_create_files() {
        let dir = std::env::temp_dir().join(format!("nodeweaver-export-{}", std::process::id()));
        let record = record();

        let json_path = write_record(&record, &dir).expect("write record");
        assert!(json_path.exists());
        let loaded = load_record(&json_path).expect("load record");
        assert_eq!(loaded.doc_id, record.doc_id);

        let export_path = write_export(&record, &dir, ExportFormat::Jsonl).expect("write export");
        assert!(export_path.ends_with("doc_training.jsonl"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
