use std::path::PathBuf;

use clap::Args;

use crate::cli::{read_candidates, read_document, GrammarArgs, OutputFormat};
use crate::matching::engine::MatchingEngine;
use crate::matching::links::{plan_link_ops, resolve_link_edits, LinkEdit};

#[derive(Args)]
pub struct LinksArgs {
    /// Document text file; use '-' for stdin
    #[arg(required = true)]
    pub document: PathBuf,

    /// Image listing (JSON, TSV, or one filename per line)
    #[arg(required = true)]
    pub candidates: PathBuf,

    #[command(flatten)]
    pub grammar: GrammarArgs,
}

/// Execute links subcommand
///
/// # Errors
///
/// Returns an error if the document, listing or configuration cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: LinksArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.grammar.resolve()?;
    let marker = config.parser.link_marker.clone();
    let text = read_document(&args.document)?;
    let candidates = read_candidates(&args.candidates)?;

    let results = MatchingEngine::with_config(&candidates, config).match_document(&text);
    let ops = plan_link_ops(&results);
    let edits = resolve_link_edits(&text, &ops, &marker);

    if verbose {
        eprintln!(
            "{} references, {} linkable, {} located",
            results.len(),
            ops.len(),
            edits.len()
        );
    }

    match format {
        OutputFormat::Text => print_text_edits(&edits),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "total_matches": results.len(),
                "edits": edits,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("line\tstart\tend\turl");
            for e in &edits {
                println!("{}\t{}\t{}\t{}", e.line_index, e.start, e.end, e.url);
            }
        }
    }

    Ok(())
}

fn print_text_edits(edits: &[LinkEdit]) {
    if edits.is_empty() {
        println!("No single matches found to apply. Check matcher results first.");
        return;
    }

    for e in edits {
        println!(
            "Line {} bytes {}..{} -> {}",
            e.line_index + 1,
            e.start,
            e.end,
            e.url
        );
    }
    println!("\n{} hyperlink(s) to apply.", edits.len());
}
