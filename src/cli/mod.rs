//! Command-line interface for comp-linker.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **match**: Match every reference in a document against an image listing
//! - **segments**: Show the references detected in a document
//! - **links**: Plan the hyperlink edits for unambiguous matches
//! - **serve**: Start the HTTP matching endpoint
//!
//! ## Usage
//!
//! ```text
//! # Match a document against a folder listing
//! comp-linker match doc.txt images.json
//!
//! # Pipe the document from another tool
//! export-doc 1AbC | comp-linker match - images.tsv --format json
//!
//! # Where would the links go?
//! comp-linker links doc.txt images.json --format tsv
//!
//! # Start the HTTP endpoint
//! comp-linker serve --port 8080
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::core::candidate::Candidate;
use crate::matching::MatchingConfig;
use crate::parsing::candidates::parse_candidates_file;

pub mod links;
pub mod matches;
pub mod segments;

#[derive(Parser)]
#[command(name = "comp-linker")]
#[command(version)]
#[command(about = "Match \"Email Comp\" references in a document to image files")]
#[command(
    long_about = "comp-linker finds \"Email Comp\" lines in document text and works out which image each [LINK] placeholder should point to.\n\nEach reference is resolved against an image listing by audience, date, time and variant, and reported as:\n- a single match, ready to be linked\n- no match\n- several possible matches, for manual resolution"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match document references to images
    Match(matches::MatchArgs),

    /// List the references detected in a document
    Segments(segments::SegmentsArgs),

    /// Plan hyperlink edits for single matches
    Links(links::LinksArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

/// Line grammar and matching options shared by the document commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GrammarArgs {
    /// JSON configuration file (parser settings, image filtering)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Placeholder marker token (default "[LINK]")
    #[arg(long)]
    pub marker: Option<String>,

    /// Reference line prefix (default "email comp")
    #[arg(long)]
    pub prefix: Option<String>,

    /// Ignore candidates that are not image files
    #[arg(long)]
    pub image_only: bool,
}

impl GrammarArgs {
    /// Configuration file (or defaults) with command-line overrides applied
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub fn resolve(&self) -> anyhow::Result<MatchingConfig> {
        let mut config = match &self.config {
            Some(path) => MatchingConfig::load_from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => MatchingConfig::default(),
        };

        if let Some(marker) = &self.marker {
            config.parser.link_marker.clone_from(marker);
        }
        if let Some(prefix) = &self.prefix {
            config.parser.line_prefix.clone_from(prefix);
        }
        if self.image_only {
            config.image_only = true;
        }

        Ok(config)
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Read document text from a file, or from stdin when the path is `-`
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read.
pub fn read_document(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading document from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading document {}", path.display()))
    }
}

/// Read a candidate listing (JSON, TSV or plain text)
///
/// # Errors
///
/// Returns an error if the listing cannot be read or parsed.
pub fn read_candidates(path: &Path) -> anyhow::Result<Vec<Candidate>> {
    parse_candidates_file(path).with_context(|| format!("reading candidates {}", path.display()))
}

/// Render an optional value for text/TSV output
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
