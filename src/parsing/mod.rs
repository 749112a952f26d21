//! Parsers turning document text and image listings into typed inputs.
//!
//! This module provides:
//!
//! - **Tokens**: classify and normalize dates, times, audiences and markers
//! - **Documents**: scan document lines into [`ParsedSegment`]s with rolling
//!   date/variant context
//! - **Candidate lists**: read image listings from JSON, TSV or plain text
//!
//! ## Example
//!
//! ```rust
//! use comp_linker::parsing::document::parse_document;
//!
//! let text = "12/31 EOY Match Impact (internal note)\nEmail Comp: Mass [LINK] Leadership [LINK]";
//! let segments = parse_document(text);
//!
//! assert_eq!(segments.len(), 2);
//! assert_eq!(segments[0].audience, "Mass");
//! assert_eq!(segments[1].link_index_in_line, Some(1));
//! assert_eq!(segments[1].date_norm.as_deref(), Some("12_31"));
//! assert_eq!(segments[1].variant_norm.as_deref(), Some("impact"));
//! ```
//!
//! [`ParsedSegment`]: crate::core::segment::ParsedSegment

use serde::{Deserialize, Serialize};

use crate::parsing::tokens::DEFAULT_LINK_MARKER;

pub mod candidates;
pub mod document;
pub mod tokens;

/// Default start of a reference line, compared case-insensitively
pub const DEFAULT_LINE_PREFIX: &str = "email comp";

/// Line grammar settings for the document parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Placeholder token marking where a link goes
    pub link_marker: String,
    /// Prefix identifying a reference line
    pub line_prefix: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            link_marker: DEFAULT_LINK_MARKER.to_string(),
            line_prefix: DEFAULT_LINE_PREFIX.to_string(),
        }
    }
}
