//! Matching engine resolving parsed segments to image files.
//!
//! This module provides the core matching functionality:
//!
//! - [`MatchingEngine`]: Filters candidates per segment and classifies the outcome
//! - [`MatchResult`]: Single, no-match or multiple outcome for one segment
//! - [`links`]: Turns single matches into hyperlink edits on placeholder markers
//!
//! ## Matching Algorithm
//!
//! Every candidate name is lowercased and checked by substring containment:
//!
//! 1. **Audience** (always): the canonical audience, lowercased
//! 2. **Date** (if known): `12_31`, `12-31` or `12.31`
//! 3. **Time** (if known): `7am` or `7a`
//! 4. **Variant** (if known): e.g. `impact`
//!
//! Exactly one passing candidate is a match; zero or several are surfaced for
//! manual resolution.
//!
//! ## Example
//!
//! ```rust
//! use comp_linker::{Candidate, MatchResult, MatchingEngine};
//!
//! let candidates = vec![Candidate::new("EOY_FS_Mass_12_30_7am.png")];
//! let engine = MatchingEngine::new(&candidates);
//! let results = engine.match_document("Email Comp: EOY URGENCY 12/30 7a MASS");
//!
//! assert!(matches!(&results[0], MatchResult::Single { candidate, .. }
//!     if candidate.name == "EOY_FS_Mass_12_30_7am.png"));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parsing::ParserConfig;

pub mod engine;
pub mod links;

pub use engine::{match_document, MatchResult, MatchSummary, MatchingEngine};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for the matching engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Line grammar used to find references
    pub parser: ParserConfig,
    /// Drop candidates without an image extension before matching
    pub image_only: bool,
}

impl MatchingConfig {
    /// Load a JSON configuration file; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read or
    /// `ConfigError::Json` if it is not a valid configuration.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: MatchingConfig =
            serde_json::from_str(r#"{"parser": {"link_marker": "{IMG}"}}"#).unwrap();
        assert_eq!(config.parser.link_marker, "{IMG}");
        assert_eq!(config.parser.line_prefix, "email comp");
        assert!(!config.image_only);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"image_only": true}}"#).unwrap();

        let config = MatchingConfig::load_from_file(file.path()).unwrap();
        assert!(config.image_only);
        assert_eq!(config.parser, ParserConfig::default());
    }

    #[test]
    fn test_load_from_file_errors() {
        let missing = MatchingConfig::load_from_file(Path::new("/nonexistent/config.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let bad = MatchingConfig::load_from_file(file.path());
        assert!(matches!(bad, Err(ConfigError::Json(_))));
    }
}
