//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use nodeweaver_core::pipeline::{ProgressReporter, process_document};
use nodeweaver_core::tags;
use nodeweaver_export::ExportFormat;
use nodeweaver_shared::{
    AppConfig, DocumentRecord, PipelineConfig, init_config, load_config, resolve_output_dir,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// NodeWeaver — turn raw documents into audited, classified nodes.
#[derive(Parser)]
#[command(
    name = "nodeweaver",
    version,
    about = "Normalize, pack, audit, and classify document text into retrieval-ready nodes.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Export rendering selected on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum Format {
    Plain,
    Detailed,
    Training,
    Markdown,
    Jsonl,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Plain => ExportFormat::Plain,
            Format::Detailed => ExportFormat::Detailed,
            Format::Training => ExportFormat::Training,
            Format::Markdown => ExportFormat::Markdown,
            Format::Jsonl => ExportFormat::Jsonl,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Process a text document into a classified node record.
    Process {
        /// Input text file (UTF-8).
        file: PathBuf,

        /// Output directory (defaults to the configured output_dir).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Additional export formats to write next to the JSON record.
        #[arg(short, long, value_enum)]
        format: Vec<Format>,

        /// Override the soft minimum tokens per node.
        #[arg(long)]
        min_tokens: Option<usize>,

        /// Override the hard maximum tokens per node.
        #[arg(long)]
        max_tokens: Option<usize>,

        /// Override the near-duplicate similarity threshold.
        #[arg(long)]
        threshold: Option<f64>,

        /// Override the maximum tags per node.
        #[arg(long)]
        max_tags: Option<usize>,
    },

    /// Re-export an existing JSON record into other formats.
    Export {
        /// Processed record (JSON) to render.
        record: PathBuf,

        /// Output directory (defaults to the record's directory).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Formats to write (defaults to plain).
        #[arg(short, long, value_enum)]
        format: Vec<Format>,
    },

    /// List the tag and domain vocabularies.
    Tags {
        /// Show domains instead of tags.
        #[arg(long)]
        domains: bool,

        /// Show the keywords behind one tag.
        #[arg(long)]
        keywords: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "nodeweaver=info",
        1 => "nodeweaver=debug",
        _ => "nodeweaver=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Process {
            file,
            out,
            format,
            min_tokens,
            max_tokens,
            threshold,
            max_tags,
        } => cmd_process(
            &file,
            out.as_deref(),
            &format,
            min_tokens,
            max_tokens,
            threshold,
            max_tags,
        ),
        Command::Export {
            record,
            out,
            format,
        } => cmd_export(&record, out.as_deref(), &format),
        Command::Tags { domains, keywords } => cmd_tags(domains, keywords.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn cmd_process(
    file: &Path,
    out: Option<&Path>,
    formats: &[Format],
    min_tokens: Option<usize>,
    max_tokens: Option<usize>,
    threshold: Option<f64>,
    max_tags: Option<usize>,
) -> Result<()> {
    let config = load_config()?;

    let mut pipeline_config = PipelineConfig::from(&config);
    if let Some(v) = min_tokens {
        pipeline_config.min_tokens = v;
    }
    if let Some(v) = max_tokens {
        pipeline_config.max_tokens = v;
    }
    if let Some(v) = threshold {
        pipeline_config.duplicate_threshold = v;
    }
    if let Some(v) = max_tags {
        pipeline_config.max_tags = v;
    }

    let raw_text = std::fs::read_to_string(file)
        .map_err(|e| eyre!("cannot read '{}': {e}", file.display()))?;
    let source_file = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let output_dir = match out {
        Some(p) => p.to_path_buf(),
        None => resolve_output_dir(&config)?,
    };

    info!(
        file = %file.display(),
        min_tokens = pipeline_config.min_tokens,
        max_tokens = pipeline_config.max_tokens,
        "processing document"
    );

    let reporter = CliProgress::new();
    let record = process_document(&raw_text, &source_file, &pipeline_config, &reporter)?;

    let record_path = nodeweaver_export::write_record(&record, &output_dir)?;
    let mut export_paths = Vec::new();
    for format in formats {
        export_paths.push(nodeweaver_export::write_export(
            &record,
            &output_dir,
            (*format).into(),
        )?);
    }

    let info = &record.processing_info;
    println!();
    println!("  Document processed!");
    println!("  Doc ID:   {}", record.doc_id);
    println!("  Nodes:    {}", record.nodes.len());
    println!(
        "  Audit:    {} -> {} (dedup {}, merged {}, invalid {})",
        info.audit_stats.original_count,
        info.audit_stats.final_count,
        info.audit_stats.original_count - info.audit_stats.after_dedup,
        info.audit_stats.after_dedup - info.audit_stats.after_merge,
        info.audit_stats.removed_invalid,
    );
    println!("  Tags:     {} unique", info.tagging_stats.total_unique_tags);
    println!(
        "  Domains:  {}",
        info.tagging_stats.detected_domains.join(", ")
    );
    println!("  Record:   {}", record_path.display());
    for path in &export_paths {
        println!("  Export:   {}", path.display());
    }
    println!();

    Ok(())
}

fn cmd_export(record_path: &Path, out: Option<&Path>, formats: &[Format]) -> Result<()> {
    let record = nodeweaver_export::load_record(record_path)?;

    let output_dir = match out {
        Some(p) => p.to_path_buf(),
        None => record_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    info!(record = %record_path.display(), nodes = record.nodes.len(), "re-exporting record");

    let formats = if formats.is_empty() {
        &[Format::Plain][..]
    } else {
        formats
    };
    for format in formats {
        let path = nodeweaver_export::write_export(&record, &output_dir, (*format).into())?;
        println!("  Export:   {}", path.display());
    }

    Ok(())
}

fn cmd_tags(domains: bool, keywords: Option<&str>) -> Result<()> {
    if let Some(tag) = keywords {
        let words = tags::tag_keywords(tag);
        if words.is_empty() {
            return Err(eyre!("unknown tag '{tag}'"));
        }
        println!("{tag}:");
        for word in words {
            println!("  - {word}");
        }
        return Ok(());
    }

    if domains {
        println!("Domains ({}):", tags::available_domains().len());
        for domain in tags::available_domains() {
            println!("  - {domain}");
        }
    } else {
        println!("Tags ({}):", tags::available_tags().len());
        for tag in tags::available_tags() {
            println!("  - {tag}");
        }
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn node_classified(&self, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Classifying [{current}/{total}]"));
    }

    fn done(&self, _record: &DocumentRecord) {
        self.spinner.finish_and_clear();
    }
}
