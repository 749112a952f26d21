use serde::{Deserialize, Serialize};

/// One audience-specific reference detected inside a document.
///
/// Raw fields hold the text as it appeared; normalized fields hold the
/// canonical tokens used for matching. Date and variant may be inherited
/// from the nearest preceding context line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSegment {
    /// Verbatim source line
    pub original_line: String,

    /// Zero-based line position within the document
    pub line_index: usize,

    /// Canonical audience, e.g. `Mass` or `LeadershipHP`
    pub audience: String,

    /// Audience token as written
    pub audience_raw: String,

    /// Canonical date, digits and underscores (e.g. `12_31`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_norm: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_raw: Option<String>,

    /// Canonical time, digits plus `am`/`pm` (e.g. `7am`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_norm: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_raw: Option<String>,

    /// Lowercased qualifier word such as `impact` or `urgency`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_norm: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_raw: Option<String>,

    /// Which placeholder in the line this segment belongs to (left to right)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_index_in_line: Option<usize>,
}

impl ParsedSegment {
    pub fn new(
        original_line: impl Into<String>,
        line_index: usize,
        audience: impl Into<String>,
        audience_raw: impl Into<String>,
    ) -> Self {
        Self {
            original_line: original_line.into(),
            line_index,
            audience: audience.into(),
            audience_raw: audience_raw.into(),
            date_norm: None,
            date_raw: None,
            time_norm: None,
            time_raw: None,
            variant_norm: None,
            variant_raw: None,
            link_index_in_line: None,
        }
    }

    /// Placeholder ordinal, treating an unset index as the first placeholder
    #[must_use]
    pub fn link_slot(&self) -> usize {
        self.link_index_in_line.unwrap_or(0)
    }

    /// Short human-readable description of the attributes used for matching
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = vec![format!("audience={}", self.audience)];
        if let Some(date) = &self.date_norm {
            parts.push(format!("date={date}"));
        }
        if let Some(time) = &self.time_norm {
            parts.push(format!("time={time}"));
        }
        if let Some(variant) = &self.variant_norm {
            parts.push(format!("variant={variant}"));
        }
        parts.push(format!("link={}", self.link_slot()));
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_skips_unset_attributes() {
        let mut seg = ParsedSegment::new("Email Comp: Mass [LINK]", 3, "Mass", "Mass");
        assert_eq!(seg.describe(), "audience=Mass link=0");

        seg.date_norm = Some("12_31".to_string());
        seg.variant_norm = Some("impact".to_string());
        seg.link_index_in_line = Some(1);
        assert_eq!(
            seg.describe(),
            "audience=Mass date=12_31 variant=impact link=1"
        );
    }

    #[test]
    fn test_serialize_omits_missing_fields() {
        let seg = ParsedSegment::new("line", 0, "Major", "MAJOR");
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["audience"], "Major");
        assert!(json.get("date_norm").is_none());
        assert!(json.get("link_index_in_line").is_none());
    }
}
