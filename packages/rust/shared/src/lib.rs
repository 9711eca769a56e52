//! Shared types, error model, and configuration for NodeWeaver.
//!
//! This crate is the foundation depended on by all other NodeWeaver crates.
//! It provides:
//! - [`NodeWeaverError`] — the unified error type
//! - Domain types ([`Node`], [`NodeMetadata`], [`DocumentRecord`], stats blocks)
//! - Configuration ([`AppConfig`], [`PipelineConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, AuditDefaults, ChunkingDefaults, PipelineConfig, TaggingDefaults, config_dir,
    config_file_path, init_config, load_config, load_config_from, resolve_output_dir,
};
pub use error::{NodeWeaverError, Result};
pub use types::{
    AuditStats, ChunkingStats, DocumentRecord, Node, NodeMetadata, PIPELINE_VERSION,
    ProcessingInfo, Section, TaggingStats, UNKNOWN_DOMAIN, estimate_tokens, node_id,
};
