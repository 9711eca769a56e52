//! NodeWeaver CLI — document-to-node construction pipeline.
//!
//! Normalizes raw Vietnamese text, packs it into token-budgeted nodes,
//! audits them, and classifies each node with tags and a domain.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
