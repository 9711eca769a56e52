//! Application configuration for NodeWeaver.
//!
//! User config lives at `~/.nodeweaver/nodeweaver.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NodeWeaverError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "nodeweaver.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".nodeweaver";

// ---------------------------------------------------------------------------
// Config structs (matching nodeweaver.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Node size targets for the packer.
    #[serde(default)]
    pub chunking: ChunkingDefaults,

    /// Audit thresholds.
    #[serde(default)]
    pub audit: AuditDefaults,

    /// Tagging limits.
    #[serde(default)]
    pub tagging: TaggingDefaults,

    /// Default output directory for processed records and exports.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

/// `[chunking]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingDefaults {
    /// Soft minimum tokens per node.
    #[serde(default = "default_min_tokens")]
    pub min_tokens: usize,

    /// Hard maximum tokens per node (except irreducible sentences).
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for ChunkingDefaults {
    fn default() -> Self {
        Self {
            min_tokens: default_min_tokens(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_min_tokens() -> usize {
    150
}
fn default_max_tokens() -> usize {
    400
}
fn default_output_dir() -> String {
    "~/nodeweaver-out".into()
}

/// `[audit]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditDefaults {
    /// Jaccard similarity at or above which two nodes are near-duplicates.
    #[serde(default = "default_duplicate_threshold")]
    pub duplicate_threshold: f64,
}

impl Default for AuditDefaults {
    fn default() -> Self {
        Self {
            duplicate_threshold: default_duplicate_threshold(),
        }
    }
}

fn default_duplicate_threshold() -> f64 {
    0.85
}

/// `[tagging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggingDefaults {
    /// Maximum tags attached per node.
    #[serde(default = "default_max_tags")]
    pub max_tags: usize,
}

impl Default for TaggingDefaults {
    fn default() -> Self {
        Self {
            max_tags: default_max_tags(),
        }
    }
}

fn default_max_tags() -> usize {
    10
}

// ---------------------------------------------------------------------------
// Pipeline config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime pipeline configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Soft minimum tokens per node.
    pub min_tokens: usize,
    /// Hard maximum tokens per node.
    pub max_tokens: usize,
    /// Near-duplicate similarity threshold, in `[0, 1]`.
    pub duplicate_threshold: f64,
    /// Maximum tags per node.
    pub max_tags: usize,
}

impl From<&AppConfig> for PipelineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            min_tokens: config.chunking.min_tokens,
            max_tokens: config.chunking.max_tokens,
            duplicate_threshold: config.audit.duplicate_threshold,
            max_tags: config.tagging.max_tags,
        }
    }
}

impl PipelineConfig {
    /// Check threshold ranges before running the pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.min_tokens == 0 || self.max_tokens < self.min_tokens {
            return Err(NodeWeaverError::validation(format!(
                "invalid token range: min_tokens={} max_tokens={}",
                self.min_tokens, self.max_tokens
            )));
        }
        if !(0.0..=1.0).contains(&self.duplicate_threshold) {
            return Err(NodeWeaverError::validation(format!(
                "duplicate_threshold {} out of range [0, 1]",
                self.duplicate_threshold
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.nodeweaver/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| NodeWeaverError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.nodeweaver/nodeweaver.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Resolve the configured output directory, expanding a leading `~/`.
pub fn resolve_output_dir(config: &AppConfig) -> Result<PathBuf> {
    let raw = &config.output_dir;
    if let Some(rest) = raw.strip_prefix("~/") {
        let home = dirs::home_dir()
            .ok_or_else(|| NodeWeaverError::config("could not determine home directory"))?;
        Ok(home.join(rest))
    } else {
        Ok(PathBuf::from(raw))
    }
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| NodeWeaverError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        NodeWeaverError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| NodeWeaverError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| NodeWeaverError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| NodeWeaverError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("min_tokens"));
        assert!(toml_str.contains("duplicate_threshold"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.chunking.min_tokens, 150);
        assert_eq!(parsed.chunking.max_tokens, 400);
        assert_eq!(parsed.tagging.max_tags, 10);
    }

    #[test]
    fn partial_config_uses_section_defaults() {
        let toml_str = r#"
[chunking]
min_tokens = 200
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.chunking.min_tokens, 200);
        assert_eq!(config.chunking.max_tokens, 400);
        assert_eq!(config.audit.duplicate_threshold, 0.85);
    }

    #[test]
    fn pipeline_config_from_app_config() {
        let app = AppConfig::default();
        let pipeline = PipelineConfig::from(&app);
        assert_eq!(pipeline.min_tokens, 150);
        assert_eq!(pipeline.max_tokens, 400);
        assert_eq!(pipeline.duplicate_threshold, 0.85);
        pipeline.validate().expect("defaults validate");
    }

    #[test]
    fn pipeline_config_rejects_bad_ranges() {
        let mut pipeline = PipelineConfig::from(&AppConfig::default());
        pipeline.duplicate_threshold = 1.5;
        assert!(pipeline.validate().is_err());

        let mut pipeline = PipelineConfig::from(&AppConfig::default());
        pipeline.max_tokens = 10;
        assert!(pipeline.validate().is_err());
    }
}
