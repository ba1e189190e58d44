//! # Init Subcommand
//!
//! Emits the starter discovery document, ready to be edited and served at
//! `/.well-known/flyweb.json`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use flyweb_core::DiscoveryDocument;

/// Arguments for the `flyweb init` subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Write the document to this path instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Execute the init subcommand.
///
/// Returns exit code: 0 on success, 2 on operational error.
pub fn run_init(args: &InitArgs) -> Result<u8> {
    let document = DiscoveryDocument::starter();
    let body = serde_json::to_string_pretty(&document)
        .context("failed to serialize starter document")?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(path, &body)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("OK: wrote {}", path.display());
        }
        None => println!("{body}"),
    }

    Ok(0)
}
