//! Document scanning.
//!
//! A document is processed in a single forward pass. Lines that start with a
//! date (`12/31 EOY Match Impact (notes)`) update the rolling context; lines
//! that start with the reference prefix (`Email Comp: ...`) produce segments.
//! Segments missing a date or variant inherit them from the context.

use tracing::debug;

use crate::core::segment::ParsedSegment;
use crate::parsing::tokens::{
    date_prefix_len, is_audience_token, is_date_token, is_link_token, is_time_token,
    normalize_audience, normalize_date, normalize_time,
};
use crate::parsing::ParserConfig;

/// Minimum tokens after the colon for the positional fallback
const POSITIONAL_MIN_TOKENS: usize = 3;

/// Date and variant seeded by the most recent context line
#[derive(Debug, Default)]
struct ParseContext {
    date_raw: Option<String>,
    date_norm: Option<String>,
    variant_raw: Option<String>,
    variant_norm: Option<String>,
}

impl ParseContext {
    /// Update the context if `line` is a context line
    fn observe(&mut self, line: &str) {
        let trimmed = line.trim();
        let Some(date_len) = date_prefix_len(trimmed) else {
            return;
        };

        let rest = &trimmed[date_len..];
        if rest
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return;
        }

        let date = &trimmed[..date_len];
        self.date_raw = Some(date.to_string());
        self.date_norm = Some(normalize_date(date));

        let before_paren = rest.split('(').next().unwrap_or_default();
        let variant = before_paren.split_whitespace().last();
        self.variant_raw = variant.map(str::to_string);
        self.variant_norm = variant.map(|v| v.trim().to_lowercase());

        debug!(
            date = %date,
            variant = ?self.variant_norm,
            "Context line updates date/variant"
        );
    }

    /// Fill in date and variant on a segment that lacks its own
    fn apply(&self, segment: &mut ParsedSegment) {
        if segment.date_raw.is_none() && self.date_raw.is_some() {
            segment.date_raw.clone_from(&self.date_raw);
            segment.date_norm.clone_from(&self.date_norm);
        }
        if segment.variant_raw.is_none() && self.variant_raw.is_some() {
            segment.variant_raw.clone_from(&self.variant_raw);
            segment.variant_norm.clone_from(&self.variant_norm);
        }
    }
}

/// The tokenized body of one reference line
struct ReferenceLine<'a> {
    line: &'a str,
    line_index: usize,
    tokens: Vec<&'a str>,
    date_raw: Option<&'a str>,
    time_raw: Option<&'a str>,
}

impl<'a> ReferenceLine<'a> {
    /// Split a reference line after its colon, or `None` if it is not one
    fn parse(line: &'a str, line_index: usize, config: &ParserConfig) -> Option<Self> {
        if !line
            .to_lowercase()
            .starts_with(&config.line_prefix.to_lowercase())
        {
            return None;
        }

        let colon = line.find(':')?;
        let tokens: Vec<&str> = line[colon + 1..].split_whitespace().collect();
        if tokens.is_empty() {
            return None;
        }

        // First date and first time anywhere on the line belong to the line
        let mut date_raw = None;
        let mut time_raw = None;
        for &tok in &tokens {
            if date_raw.is_none() && is_date_token(tok) {
                date_raw = Some(tok);
            } else if time_raw.is_none() && is_time_token(tok) {
                time_raw = Some(tok);
            }
        }

        Some(Self {
            line,
            line_index,
            tokens,
            date_raw,
            time_raw,
        })
    }

    fn date_norm(&self) -> Option<String> {
        self.date_raw.map(normalize_date)
    }

    fn time_norm(&self) -> Option<String> {
        self.time_raw.map(normalize_time)
    }

    /// Segment for `audience_raw` carrying the line's own date and time
    fn segment(&self, audience_raw: &str, link_index: usize) -> ParsedSegment {
        let mut segment = ParsedSegment::new(
            self.line,
            self.line_index,
            normalize_audience(audience_raw),
            audience_raw,
        );
        segment.date_raw = self.date_raw.map(str::to_string);
        segment.date_norm = self.date_norm();
        segment.time_raw = self.time_raw.map(str::to_string);
        segment.time_norm = self.time_norm();
        segment.link_index_in_line = Some(link_index);
        segment
    }
}

/// A way of pulling segments out of a reference line.
///
/// Strategies are tried in order; the first one that yields anything wins.
type ExtractStrategy = fn(&ReferenceLine<'_>, &ParserConfig) -> Vec<ParsedSegment>;

const STRATEGIES: [(&str, ExtractStrategy); 2] = [
    ("marker-pairs", extract_marker_pairs),
    ("positional", extract_positional),
];

/// `Audience [LINK]` and `[LINK] Audience` pairs, numbered by marker position
fn extract_marker_pairs(line: &ReferenceLine<'_>, config: &ParserConfig) -> Vec<ParsedSegment> {
    let marker = config.link_marker.as_str();
    let tokens = &line.tokens;
    let mut segments = Vec::new();
    let mut link_counter = 0;
    let mut i = 0;

    while i < tokens.len() {
        let current = tokens[i];
        let next = tokens.get(i + 1).copied();

        if is_audience_token(current) && next.is_some_and(|n| is_link_token(n, marker)) {
            segments.push(line.segment(current, link_counter));
            link_counter += 1;
            i += 2;
            continue;
        }

        if is_link_token(current, marker) {
            if let Some(audience) = next.filter(|n| is_audience_token(n)) {
                segments.push(line.segment(audience, link_counter));
                link_counter += 1;
                i += 2;
                continue;
            }
            // unpaired marker still occupies a slot
            link_counter += 1;
        }

        i += 1;
    }

    segments
}

/// Legacy `... DATE TIME AUDIENCE` lines, read from the end.
///
/// The last three tokens are taken as date, time and audience without
/// checking their shape. Normalized date/time come from the positional token
/// when it has the right shape, else from whatever the line itself carries.
fn extract_positional(line: &ReferenceLine<'_>, _config: &ParserConfig) -> Vec<ParsedSegment> {
    let n = line.tokens.len();
    if n < POSITIONAL_MIN_TOKENS {
        return Vec::new();
    }

    let audience_raw = line.tokens[n - 1];
    let time_raw = line.tokens[n - 2];
    let date_raw = line.tokens[n - 3];

    let mut segment = ParsedSegment::new(
        line.line,
        line.line_index,
        normalize_audience(audience_raw),
        audience_raw,
    );
    segment.date_raw = Some(date_raw.to_string());
    segment.date_norm = if is_date_token(date_raw) {
        Some(normalize_date(date_raw))
    } else {
        line.date_norm()
    };
    segment.time_raw = Some(time_raw.to_string());
    segment.time_norm = if is_time_token(time_raw) {
        Some(normalize_time(time_raw))
    } else {
        line.time_norm()
    };
    segment.link_index_in_line = Some(0);

    vec![segment]
}

/// Parse a single line into segments, without any document context.
///
/// Returns an empty list for lines that are not reference lines or that
/// carry nothing recognizable.
#[must_use]
pub fn parse_line(line: &str, line_index: usize, config: &ParserConfig) -> Vec<ParsedSegment> {
    let Some(reference) = ReferenceLine::parse(line, line_index, config) else {
        return Vec::new();
    };

    for (name, strategy) in STRATEGIES {
        let segments = strategy(&reference, config);
        if !segments.is_empty() {
            debug!(
                line = line_index,
                strategy = name,
                count = segments.len(),
                "Extracted segments"
            );
            return segments;
        }
    }

    debug!(line = line_index, "Reference line yielded no segments");
    Vec::new()
}

/// Parse a whole document with the default line grammar
#[must_use]
pub fn parse_document(text: &str) -> Vec<ParsedSegment> {
    parse_document_with_config(text, &ParserConfig::default())
}

/// Parse a whole document, one segment per detected reference, in order
#[must_use]
pub fn parse_document_with_config(text: &str, config: &ParserConfig) -> Vec<ParsedSegment> {
    let mut context = ParseContext::default();
    let mut results = Vec::new();

    // `lines` strips a trailing "\r" as well as the "\n"
    for (idx, line) in text.lines().enumerate() {
        context.observe(line);

        for mut segment in parse_line(line, idx, config) {
            context.apply(&mut segment);
            results.push(segment);
        }
    }

    results
}
