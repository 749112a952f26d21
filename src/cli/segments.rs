use std::path::PathBuf;

use clap::Args;

use crate::cli::{or_dash, read_document, GrammarArgs, OutputFormat};
use crate::core::segment::ParsedSegment;
use crate::parsing::document::parse_document_with_config;

#[derive(Args)]
pub struct SegmentsArgs {
    /// Document text file; use '-' for stdin
    #[arg(required = true)]
    pub document: PathBuf,

    #[command(flatten)]
    pub grammar: GrammarArgs,
}

/// Execute segments subcommand
///
/// # Errors
///
/// Returns an error if the document or configuration cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SegmentsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.grammar.resolve()?;
    let text = read_document(&args.document)?;
    let segments = parse_document_with_config(&text, &config.parser);

    if verbose {
        eprintln!(
            "Scanned {} lines, found {} references",
            text.lines().count(),
            segments.len()
        );
    }

    match format {
        OutputFormat::Text => print_text_segments(&segments, &config.parser.line_prefix),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&segments)?);
        }
        OutputFormat::Tsv => print_tsv_segments(&segments),
    }

    Ok(())
}

fn print_text_segments(segments: &[ParsedSegment], prefix: &str) {
    if segments.is_empty() {
        println!("No references found (line prefix \"{prefix}\").");
        return;
    }

    for segment in segments {
        println!(
            "Line {} [{}]: {}",
            segment.line_index + 1,
            segment.link_slot(),
            segment.describe()
        );
    }
}

fn print_tsv_segments(segments: &[ParsedSegment]) {
    println!("line\tlink\taudience\taudience_raw\tdate\tdate_raw\ttime\ttime_raw\tvariant");
    for s in segments {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            s.line_index,
            s.link_slot(),
            s.audience,
            s.audience_raw,
            or_dash(s.date_norm.as_deref()),
            or_dash(s.date_raw.as_deref()),
            or_dash(s.time_norm.as_deref()),
            or_dash(s.time_raw.as_deref()),
            or_dash(s.variant_norm.as_deref()),
        );
    }
}
