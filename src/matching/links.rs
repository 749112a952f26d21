//! Planning hyperlink edits from match results.
//!
//! Only single matches whose candidate carries a URL become edits. An edit
//! targets the n-th placeholder marker of a line, where n is the segment's
//! link slot; the document store applies the link to that byte range.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::matching::engine::MatchResult;

/// A link to apply to the n-th placeholder of a line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOp {
    pub line_index: usize,
    pub link_index_in_line: usize,
    pub url: String,
}

/// A located link edit: byte range of the marker within its line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEdit {
    pub line_index: usize,
    pub start: usize,
    pub end: usize,
    pub url: String,
}

/// Collect link operations for every single match that has a URL
#[must_use]
pub fn plan_link_ops(results: &[MatchResult]) -> Vec<LinkOp> {
    results
        .iter()
        .filter_map(|result| match result {
            MatchResult::Single { segment, candidate } => {
                candidate.url.as_ref().map(|url| LinkOp {
                    line_index: segment.line_index,
                    link_index_in_line: segment.link_slot(),
                    url: url.clone(),
                })
            }
            _ => None,
        })
        .collect()
}

/// Byte offset of the `occurrence`-th (zero-based) `marker` in `line`.
///
/// The search is exact and case-sensitive, as the document store matches
/// the literal marker text.
#[must_use]
pub fn locate_marker(line: &str, occurrence: usize, marker: &str) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }
    line.match_indices(marker).nth(occurrence).map(|(pos, _)| pos)
}

/// Resolve link operations to byte ranges in `text`.
///
/// Operations pointing at a missing line or marker are logged and skipped.
#[must_use]
pub fn resolve_link_edits(text: &str, ops: &[LinkOp], marker: &str) -> Vec<LinkEdit> {
    let lines: Vec<&str> = text.lines().collect();
    let mut edits = Vec::with_capacity(ops.len());

    for op in ops {
        let Some(line) = lines.get(op.line_index) else {
            warn!(line = op.line_index, "Link target line does not exist");
            continue;
        };

        let Some(start) = locate_marker(line, op.link_index_in_line, marker) else {
            warn!(
                line = op.line_index,
                link = op.link_index_in_line,
                "Could not find {marker} #{} in line",
                op.link_index_in_line
            );
            continue;
        };

        edits.push(LinkEdit {
            line_index: op.line_index,
            start,
            end: start + marker.len(),
            url: op.url.clone(),
        });
    }

    edits
}
