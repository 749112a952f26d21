use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::candidate::Candidate;
use crate::core::segment::ParsedSegment;
use crate::core::types::MatchKind;
use crate::matching::MatchingConfig;
use crate::parsing::document::parse_document_with_config;
use crate::utils::validation::is_image_name;

/// Reason attached to segments no candidate satisfies
pub const NO_MATCH_REASON: &str = "No matching image found";

/// Outcome of resolving one segment against the candidate list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchResult {
    /// Exactly one candidate passed
    Single {
        segment: ParsedSegment,
        candidate: Candidate,
    },

    /// Nothing passed
    #[serde(rename = "none")]
    NoMatch {
        segment: ParsedSegment,
        reason: String,
    },

    /// Several candidates passed, in input order
    Multiple {
        segment: ParsedSegment,
        candidates: Vec<Candidate>,
    },
}

impl MatchResult {
    /// Classify the passing candidates for a segment
    #[must_use]
    pub fn classify(segment: ParsedSegment, mut passing: Vec<Candidate>) -> Self {
        match passing.len() {
            0 => Self::NoMatch {
                segment,
                reason: NO_MATCH_REASON.to_string(),
            },
            1 => Self::Single {
                segment,
                candidate: passing.remove(0),
            },
            _ => Self::Multiple {
                segment,
                candidates: passing,
            },
        }
    }

    #[must_use]
    pub fn segment(&self) -> &ParsedSegment {
        match self {
            Self::Single { segment, .. }
            | Self::NoMatch { segment, .. }
            | Self::Multiple { segment, .. } => segment,
        }
    }

    #[must_use]
    pub fn kind(&self) -> MatchKind {
        match self {
            Self::Single { .. } => MatchKind::Single,
            Self::NoMatch { .. } => MatchKind::None,
            Self::Multiple { .. } => MatchKind::Multiple,
        }
    }

    /// All candidates carried by this result (empty for no match)
    #[must_use]
    pub fn candidates(&self) -> Vec<&Candidate> {
        match self {
            Self::Single { candidate, .. } => vec![candidate],
            Self::NoMatch { .. } => Vec::new(),
            Self::Multiple { candidates, .. } => candidates.iter().collect(),
        }
    }
}

/// Counts of each outcome across a document
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub single: usize,
    pub none: usize,
    pub multiple: usize,
}

impl MatchSummary {
    #[must_use]
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.kind() {
                MatchKind::Single => summary.single += 1,
                MatchKind::None => summary.none += 1,
                MatchKind::Multiple => summary.multiple += 1,
            }
        }
        summary
    }
}

/// Substring tests derived from one segment
#[derive(Debug)]
struct SegmentFilter {
    audience: String,
    dates: Option<[String; 3]>,
    times: Option<[String; 2]>,
    variant: Option<String>,
}

impl SegmentFilter {
    fn new(segment: &ParsedSegment) -> Self {
        let dates = segment.date_norm.as_ref().map(|d| {
            let d = d.to_lowercase();
            [d.replace('_', "-"), d.replace('_', "."), d]
        });
        let times = segment.time_norm.as_ref().map(|t| {
            let t = t.to_lowercase();
            let short = t.replacen("am", "a", 1).replacen("pm", "p", 1);
            [t, short]
        });

        Self {
            audience: segment.audience.to_lowercase(),
            dates,
            times,
            variant: segment.variant_norm.clone(),
        }
    }

    /// Unset attributes impose no constraint
    fn accepts(&self, name_lc: &str) -> bool {
        if !name_lc.contains(&self.audience) {
            return false;
        }
        if let Some(dates) = &self.dates {
            if !dates.iter().any(|d| name_lc.contains(d.as_str())) {
                return false;
            }
        }
        if let Some(times) = &self.times {
            if !times.iter().any(|t| name_lc.contains(t.as_str())) {
                return false;
            }
        }
        if let Some(variant) = &self.variant {
            if !name_lc.contains(variant.as_str()) {
                return false;
            }
        }
        true
    }
}

/// The main matching engine
pub struct MatchingEngine<'a> {
    /// Candidates eligible for matching, in input order
    candidates: Vec<&'a Candidate>,
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    #[must_use]
    pub fn new(candidates: &'a [Candidate]) -> Self {
        Self::with_config(candidates, MatchingConfig::default())
    }

    /// Create a new matching engine with custom configuration
    #[must_use]
    pub fn with_config(candidates: &'a [Candidate], config: MatchingConfig) -> Self {
        let candidates = candidates
            .iter()
            .filter(|c| !config.image_only || is_image_name(&c.name))
            .collect();
        Self { candidates, config }
    }

    /// Number of candidates that take part in matching
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Resolve one segment against every candidate
    #[must_use]
    pub fn find_match(&self, segment: &ParsedSegment) -> MatchResult {
        let filter = SegmentFilter::new(segment);
        let passing: Vec<Candidate> = self
            .candidates
            .iter()
            .filter(|c| filter.accepts(&c.match_key()))
            .map(|c| (*c).clone())
            .collect();

        let result = MatchResult::classify(segment.clone(), passing);
        debug!(
            line = segment.line_index,
            segment = %segment.describe(),
            outcome = %result.kind(),
            "Matched segment"
        );
        result
    }

    /// Resolve each segment independently; candidates are never consumed
    #[must_use]
    pub fn match_segments(&self, segments: &[ParsedSegment]) -> Vec<MatchResult> {
        segments.iter().map(|s| self.find_match(s)).collect()
    }

    /// Parse a document and resolve every segment, in document order
    #[must_use]
    pub fn match_document(&self, text: &str) -> Vec<MatchResult> {
        let segments = parse_document_with_config(text, &self.config.parser);
        self.match_segments(&segments)
    }
}

/// Parse `text` and match it against `candidates` with default settings
#[must_use]
pub fn match_document(text: &str, candidates: &[Candidate]) -> Vec<MatchResult> {
    MatchingEngine::new(candidates).match_document(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::{sample_candidates, SAMPLE_DOCUMENT};

    fn names(result: &MatchResult) -> Vec<&str> {
        result.candidates().iter().map(|c| c.name.as_str()).collect()
    }

    fn segment(audience: &str) -> ParsedSegment {
        ParsedSegment::new("Email Comp: test", 0, audience, audience)
    }

    #[test]
    fn test_legacy_line_single_match() {
        let candidates = vec![Candidate::new("EOY_FS_Mass_12_30_7am.png")];
        let results = match_document("Email Comp: EOY URGENCY 12/30 7a MASS", &candidates);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind(), MatchKind::Single);
        assert_eq!(names(&results[0]), vec!["EOY_FS_Mass_12_30_7am.png"]);
    }

    #[test]
    fn test_legacy_line_multiple_in_input_order() {
        let candidates = vec![
            Candidate::new("EOY_FS_Mass_12_30_7am_v2.png"),
            Candidate::new("Other.png"),
            Candidate::new("eoy-mass-12-30-7a.jpg"),
        ];
        let results = match_document("Email Comp: EOY URGENCY 12/30 7a MASS", &candidates);
        assert_eq!(results[0].kind(), MatchKind::Multiple);
        assert_eq!(
            names(&results[0]),
            vec!["EOY_FS_Mass_12_30_7am_v2.png", "eoy-mass-12-30-7a.jpg"]
        );
    }

    #[test]
    fn test_no_match_reason() {
        let candidates = vec![Candidate::new("EOY_FS_Mass_12_30_7am.png")];
        let results = match_document("Email Comp: MAJOR [LINK]", &candidates);
        match &results[0] {
            MatchResult::NoMatch { segment, reason } => {
                assert_eq!(segment.audience, "Major");
                assert_eq!(reason, NO_MATCH_REASON);
            }
            other => panic!("expected no match, got {other:?}"),
        }
    }

    #[test]
    fn test_date_separator_variants() {
        let mut seg = segment("Mass");
        seg.date_norm = Some("12_31".to_string());
        let candidates = vec![
            Candidate::new("Mass_12_31.png"),
            Candidate::new("Mass-12-31.png"),
            Candidate::new("Mass.12.31.png"),
            Candidate::new("Mass 12/31.png"),
        ];
        let engine = MatchingEngine::new(&candidates);
        assert_eq!(
            names(&engine.find_match(&seg)),
            vec!["Mass_12_31.png", "Mass-12-31.png", "Mass.12.31.png"]
        );
    }

    #[test]
    fn test_time_short_form() {
        let mut seg = segment("Leadership");
        seg.time_norm = Some("7pm".to_string());
        let candidates = vec![
            Candidate::new("Leadership_7p.png"),
            Candidate::new("Leadership_7am.png"),
        ];
        let result = MatchingEngine::new(&candidates).find_match(&seg);
        assert_eq!(names(&result), vec!["Leadership_7p.png"]);
    }

    #[test]
    fn test_variant_enforced_only_when_known() {
        let candidates = vec![
            Candidate::new("EOY_Mass_12.31_Impact.png"),
            Candidate::new("EOY_Mass_12.31_Urgency.png"),
        ];
        let engine = MatchingEngine::new(&candidates);

        let mut seg = segment("Mass");
        seg.date_norm = Some("12_31".to_string());
        assert_eq!(engine.find_match(&seg).kind(), MatchKind::Multiple);

        seg.variant_norm = Some("impact".to_string());
        assert_eq!(names(&engine.find_match(&seg)), vec!["EOY_Mass_12.31_Impact.png"]);
    }

    #[test]
    fn test_audience_substring_overlaps() {
        // "mass" is a substring of "masshp"; both pass for a Mass segment
        let candidates = vec![Candidate::new("Mass_1.png"), Candidate::new("MassHP_1.png")];
        let engine = MatchingEngine::new(&candidates);
        assert_eq!(engine.find_match(&segment("Mass")).kind(), MatchKind::Multiple);
        assert_eq!(
            names(&engine.find_match(&segment("MassHP"))),
            vec!["MassHP_1.png"]
        );
    }

    #[test]
    fn test_duplicate_candidates_retained() {
        let candidates = vec![Candidate::new("Major.png"), Candidate::new("Major.png")];
        let result = MatchingEngine::new(&candidates).find_match(&segment("Major"));
        assert_eq!(names(&result), vec!["Major.png", "Major.png"]);
    }

    #[test]
    fn test_candidates_not_consumed() {
        let candidates = vec![Candidate::new("Major.png")];
        let results = match_document(
            "Email Comp: Major [LINK]\nEmail Comp: Major [LINK]",
            &candidates,
        );
        assert!(results.iter().all(|r| r.kind() == MatchKind::Single));
    }

    #[test]
    fn test_image_only_filter() {
        let candidates = vec![Candidate::new("Major.txt"), Candidate::new("Major.png")];
        let config = MatchingConfig {
            image_only: true,
            ..MatchingConfig::default()
        };
        let engine = MatchingEngine::with_config(&candidates, config);
        assert_eq!(engine.candidate_count(), 1);
        assert_eq!(names(&engine.find_match(&segment("Major"))), vec!["Major.png"]);
    }

    #[test]
    fn test_sample_document_all_single() {
        let candidates = sample_candidates();
        let results = match_document(SAMPLE_DOCUMENT, &candidates);
        assert_eq!(results.len(), 4);
        for (result, candidate) in results.iter().zip(&candidates) {
            match result {
                MatchResult::Single { candidate: c, .. } => assert_eq!(c, candidate),
                other => panic!("expected single, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_serialized_tags() {
        let candidates = sample_candidates();
        let results = match_document(
            "Email Comp: Mass [LINK]\nEmail Comp: 1/1 Major [LINK]\nEmail Comp: 12/30 Leadership [LINK]",
            &candidates,
        );
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json[0]["type"], "single");
        assert_eq!(json[1]["type"], "none");
        assert_eq!(json[1]["reason"], NO_MATCH_REASON);
        assert_eq!(json[2]["type"], "single");
        assert_eq!(json[2]["candidate"]["name"], "EOY_FS_LeadershipHP_12_30_7pm.png");
    }

    #[test]
    fn test_matching_is_idempotent() {
        let candidates = sample_candidates();
        let first = serde_json::to_string(&match_document(SAMPLE_DOCUMENT, &candidates)).unwrap();
        let second = serde_json::to_string(&match_document(SAMPLE_DOCUMENT, &candidates)).unwrap();
        assert_eq!(first, second);
    }
}
