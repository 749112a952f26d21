//! Token classification and normalization.
//!
//! Every function here is total: any input yields an answer, nothing is
//! rejected. Normalized forms are what the matcher compares against
//! lowercased filenames.

use crate::core::types::{Audience, AUDIENCE_VOCABULARY};

/// Default placeholder marking where a hyperlink goes
pub const DEFAULT_LINK_MARKER: &str = "[LINK]";

const DATE_SEPARATORS: [char; 4] = ['/', '.', '_', '-'];

/// Number of leading ASCII digits, capped at `max`
fn leading_digits(s: &str, max: usize) -> usize {
    s.bytes().take(max).take_while(u8::is_ascii_digit).count()
}

/// Length in bytes of a date-shaped prefix of `s` (`D{1,2} SEP D{1,2}`).
///
/// Returns the longest such prefix, or `None` if `s` does not start with one.
pub(crate) fn date_prefix_len(s: &str) -> Option<usize> {
    let month = leading_digits(s, 2);
    if month == 0 {
        return None;
    }
    let sep = s[month..].chars().next()?;
    if !DATE_SEPARATORS.contains(&sep) {
        return None;
    }
    let rest = &s[month + 1..];
    let day = leading_digits(rest, 2);
    if day == 0 {
        return None;
    }
    Some(month + 1 + day)
}

/// True for tokens like `12/31`, `12.31`, `12_31`, `1-5`.
///
/// Month and day ranges are not checked.
#[must_use]
pub fn is_date_token(token: &str) -> bool {
    let t = token.trim();
    date_prefix_len(t) == Some(t.len())
}

/// True for tokens like `7a`, `7am`, `7:00p`, `10PM`.
#[must_use]
pub fn is_time_token(token: &str) -> bool {
    let t = token.trim().to_lowercase();
    let hours = leading_digits(&t, 2);
    if hours == 0 {
        return false;
    }
    let mut rest = &t[hours..];
    if let Some(after_colon) = rest.strip_prefix(':') {
        if after_colon.len() < 2 || leading_digits(after_colon, 2) != 2 {
            return false;
        }
        rest = &after_colon[2..];
    }
    matches!(rest, "a" | "p" | "am" | "pm")
}

/// True if the token is one of the known audience codes
#[must_use]
pub fn is_audience_token(token: &str) -> bool {
    let t = token.trim().to_lowercase();
    AUDIENCE_VOCABULARY.contains(&t.as_str())
}

/// True if the token is the placeholder marker, ignoring case and padding
#[must_use]
pub fn is_link_token(token: &str, marker: &str) -> bool {
    token.trim().to_uppercase() == marker.trim().to_uppercase()
}

/// Map an audience token to its display form.
///
/// Unknown tokens are capitalized: first character upper, rest lower.
#[must_use]
pub fn normalize_audience(raw: &str) -> String {
    if let Some(audience) = Audience::parse(raw) {
        return audience.display_name().to_string();
    }

    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// `12/31`, `12-31` and `12.31` all become `12_31`
#[must_use]
pub fn normalize_date(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if DATE_SEPARATORS.contains(&c) { '_' } else { c })
        .collect()
}

/// `7a` becomes `7am`; `7pm` stays `7pm`.
///
/// Anything that does not end in `a`/`p`/`am`/`pm` comes back lowercased
/// with whitespace removed.
#[must_use]
pub fn normalize_time(raw: &str) -> String {
    let t: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if t.ends_with("am") || t.ends_with("pm") {
        return t;
    }
    if let Some(stem) = t.strip_suffix('a') {
        return format!("{stem}am");
    }
    if let Some(stem) = t.strip_suffix('p') {
        return format!("{stem}pm");
    }
    t
}
