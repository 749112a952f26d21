//! # comp-linker
//!
//! A library for attaching image links to "Email Comp" references in document text.
//!
//! Campaign documents list the email comps to be produced, one line per comp, with a
//! `[LINK]` placeholder where the finished image should be linked. The images live in
//! a storage folder under names like `EOY_FS_Mass_12_30_7am.png`. Pairing the two by
//! hand is slow and error-prone.
//!
//! `comp-linker` parses the document, works out the audience, date, time and variant
//! of each reference, and resolves it against the image listing.
//!
//! ## Features
//!
//! - **Pair parsing**: `Mass [LINK] Leadership [LINK]` and `[LINK] Mass [LINK] Leadership`
//! - **Legacy lines**: `EOY URGENCY 12/30 7a MASS` read positionally from the end
//! - **Rolling context**: a `12/31 EOY Match Impact` heading seeds date and variant
//! - **Tolerant matching**: `12_31`, `12-31`, `12.31` and `7am`, `7a` are equivalent
//! - **Explicit ambiguity**: no match and multiple matches are reported, never guessed
//! - **Link planning**: byte ranges of the placeholders to hyperlink
//!
//! ## Example
//!
//! ```rust
//! use comp_linker::{match_document, Candidate, MatchResult};
//!
//! let doc = "12/31 EOY Match Impact (internal note)\nEmail Comp: Mass [LINK] Leadership [LINK]";
//! let images = vec![
//!     Candidate::new("EOY_Mass_12.31_Impact.png").with_url("https://example.com/1"),
//!     Candidate::new("EOY_Leadership_12.31_Urgency.png"),
//! ];
//!
//! let results = match_document(doc, &images);
//! assert!(matches!(results[0], MatchResult::Single { .. }));
//! assert!(matches!(results[1], MatchResult::NoMatch { .. }));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Candidates, parsed segments, audience vocabulary
//! - [`parsing`]: Token normalization, document scanning, image listings
//! - [`matching`]: Matching engine and link planning
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP matching endpoint

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use core::candidate::Candidate;
pub use core::segment::ParsedSegment;
pub use core::types::*;
pub use matching::engine::{match_document, MatchResult, MatchSummary, MatchingEngine};
pub use matching::MatchingConfig;
pub use parsing::document::parse_document;
pub use parsing::ParserConfig;
