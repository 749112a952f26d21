use std::path::PathBuf;

use clap::Args;

use crate::cli::{or_dash, read_candidates, read_document, GrammarArgs, OutputFormat};
use crate::matching::engine::{MatchResult, MatchSummary, MatchingEngine};

#[derive(Args)]
pub struct MatchArgs {
    /// Document text file; use '-' for stdin
    #[arg(required = true)]
    pub document: PathBuf,

    /// Image listing (JSON, TSV, or one filename per line)
    #[arg(required = true)]
    pub candidates: PathBuf,

    #[command(flatten)]
    pub grammar: GrammarArgs,
}

/// Execute match subcommand
///
/// # Errors
///
/// Returns an error if the document, listing or configuration cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.grammar.resolve()?;
    let text = read_document(&args.document)?;
    let candidates = read_candidates(&args.candidates)?;

    let prefix = config.parser.line_prefix.clone();
    let engine = MatchingEngine::with_config(&candidates, config);

    if verbose {
        eprintln!(
            "Loaded {} candidates ({} eligible for matching)",
            candidates.len(),
            engine.candidate_count()
        );
    }

    let results = engine.match_document(&text);

    match format {
        OutputFormat::Text => print_text_results(&results, &prefix),
        OutputFormat::Json => print_json_results(&results)?,
        OutputFormat::Tsv => print_tsv_results(&results),
    }

    Ok(())
}

fn print_text_results(results: &[MatchResult], prefix: &str) {
    if results.is_empty() {
        println!("No references found (line prefix \"{prefix}\").");
        return;
    }

    println!("Matching Results");
    println!("{}", "=".repeat(60));

    for result in results {
        let segment = result.segment();
        println!("\nLine {}: {}", segment.line_index + 1, segment.original_line.trim());
        println!("  Parsed: {}", segment.describe());

        match result {
            MatchResult::Single { candidate, .. } => {
                println!("  Match: {candidate}");
            }
            MatchResult::NoMatch { reason, .. } => {
                println!("  No match: {reason}");
            }
            MatchResult::Multiple { candidates, .. } => {
                println!("  Multiple matches ({}):", candidates.len());
                for candidate in candidates {
                    println!("    - {candidate}");
                }
            }
        }
    }

    let summary = MatchSummary::from_results(results);
    println!(
        "\nSummary: {} single, {} none, {} multiple",
        summary.single, summary.none, summary.multiple
    );
}

fn print_json_results(results: &[MatchResult]) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "results": results,
        "summary": MatchSummary::from_results(results),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(results: &[MatchResult]) {
    println!("line\tlink\taudience\tdate\ttime\tvariant\ttype\tcandidates");
    for result in results {
        let segment = result.segment();
        let names: Vec<&str> = result
            .candidates()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            segment.line_index,
            segment.link_slot(),
            segment.audience,
            or_dash(segment.date_norm.as_deref()),
            or_dash(segment.time_norm.as_deref()),
            or_dash(segment.variant_norm.as_deref()),
            result.kind(),
            names.join(","),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::sample_candidates;
    use crate::matching::engine::match_document;

    #[test]
    fn test_summary_counts() {
        let candidates = sample_candidates();
        let doc = "Email Comp: Mass [LINK] Donors [LINK]\nEmail Comp: Major [LINK]\nEmail Comp: 1/1 7a Monthly [LINK]";
        let results = match_document(doc, &candidates);
        assert_eq!(
            MatchSummary::from_results(&results),
            MatchSummary {
                single: 2,
                none: 1,
                multiple: 0,
            }
        );
    }
}
