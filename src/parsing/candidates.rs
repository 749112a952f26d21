//! Image listings.
//!
//! Candidates can be supplied as:
//!
//! - JSON: an array of `{"name": ..., "url": ...}` objects, or an object with
//!   an `images` array of the same
//! - TSV: `name<TAB>url` per line (the url column is optional)
//! - Plain text: one filename per line
//!
//! Blank lines and `#` comments are skipped in the line-based formats.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::candidate::Candidate;
use crate::utils::validation::check_candidate_limit;

#[derive(Error, Debug)]
pub enum CandidateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON candidate list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid candidate list: {0}")]
    InvalidFormat(String),

    #[error("Too many candidates: {0} exceeds maximum allowed")]
    TooManyCandidates(usize),
}

/// JSON shapes accepted for a candidate list
#[derive(Deserialize)]
#[serde(untagged)]
enum CandidateListJson {
    List(Vec<Candidate>),
    Wrapped { images: Vec<Candidate> },
}

/// Read a candidate list, choosing the format from the file extension.
///
/// `.json` is parsed as JSON, `.tsv` as TSV; anything else is sniffed: text
/// starting with `[` or `{` is JSON, otherwise lines are split on tabs.
///
/// # Errors
///
/// Returns `CandidateError::Io` if the file cannot be read, or the parse
/// errors of [`parse_candidates_json`] / [`parse_candidates_text`].
pub fn parse_candidates_file(path: &Path) -> Result<Vec<Candidate>, CandidateError> {
    let content = std::fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("json") => parse_candidates_json(&content),
        Some("tsv" | "txt") => parse_candidates_text(&content),
        _ => parse_candidates_auto(&content),
    }
}

/// Parse candidates from text of unknown format
///
/// # Errors
///
/// See [`parse_candidates_json`] and [`parse_candidates_text`].
pub fn parse_candidates_auto(content: &str) -> Result<Vec<Candidate>, CandidateError> {
    let head = content.trim_start();
    if head.starts_with('[') || head.starts_with('{') {
        parse_candidates_json(content)
    } else {
        parse_candidates_text(content)
    }
}

/// Parse a JSON candidate list
///
/// # Errors
///
/// Returns `CandidateError::Json` for malformed JSON, `InvalidFormat` for an
/// entry with an empty name, or `TooManyCandidates` if the limit is exceeded.
pub fn parse_candidates_json(content: &str) -> Result<Vec<Candidate>, CandidateError> {
    let candidates = match serde_json::from_str::<CandidateListJson>(content)? {
        CandidateListJson::List(list) | CandidateListJson::Wrapped { images: list } => list,
    };

    if let Some(pos) = candidates.iter().position(|c| c.name.trim().is_empty()) {
        return Err(CandidateError::InvalidFormat(format!(
            "Entry {pos} has an empty name"
        )));
    }
    if check_candidate_limit(candidates.len()).is_some() {
        return Err(CandidateError::TooManyCandidates(candidates.len()));
    }

    Ok(candidates)
}

/// Parse a line-based candidate list: `name[<TAB>url]` per line
///
/// # Errors
///
/// Returns `CandidateError::TooManyCandidates` if the limit is exceeded.
pub fn parse_candidates_text(content: &str) -> Result<Vec<Candidate>, CandidateError> {
    let mut candidates = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split('\t');
        let name = fields.next().unwrap_or_default().trim();
        if name.is_empty() {
            continue;
        }

        let mut candidate = Candidate::new(name);
        if let Some(url) = fields.next().map(str::trim).filter(|u| !u.is_empty()) {
            candidate = candidate.with_url(url);
        }

        if check_candidate_limit(candidates.len()).is_some() {
            return Err(CandidateError::TooManyCandidates(candidates.len()));
        }
        candidates.push(candidate);
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let json = r#"[
            {"name": "EOY_FS_Mass_12_30_7am.png", "url": "https://box.com/file/1"},
            {"name": "EOY_FS_Major_12_31_8am.png"}
        ]"#;
        let list = parse_candidates_json(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].url.as_deref(), Some("https://box.com/file/1"));
        assert!(list[1].url.is_none());
    }

    #[test]
    fn test_parse_json_wrapped() {
        let json = r#"{"images": [{"name": "a.png"}]}"#;
        let list = parse_candidates_auto(json).unwrap();
        assert_eq!(list, vec![Candidate::new("a.png")]);
    }

    #[test]
    fn test_parse_json_rejects_empty_name() {
        let err = parse_candidates_json(r#"[{"name": "  "}]"#).unwrap_err();
        assert!(matches!(err, CandidateError::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_json_malformed() {
        assert!(matches!(
            parse_candidates_json("[{\"name\": 1}]"),
            Err(CandidateError::Json(_))
        ));
    }

    #[test]
    fn test_parse_text_with_urls_and_comments() {
        let text = "# images\nEOY_FS_Mass_12_30_7am.png\thttps://box.com/file/1\n\nEOY_FS_Major_12_31_8am.png\n";
        let list = parse_candidates_auto(text).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "EOY_FS_Mass_12_30_7am.png");
        assert_eq!(list[0].url.as_deref(), Some("https://box.com/file/1"));
        assert_eq!(list[1].url, None);
    }
}
