use serde::{Deserialize, Serialize};

/// An image file that a reference may resolve to.
///
/// Identity is the `name` as reported by storage. The `url` is the link that
/// ends up on the placeholder when the candidate is the single match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Filename, e.g. `EOY_FS_Mass_12.31_Impact.png`
    pub name: String,

    /// Resolvable link to the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Candidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Lowercased filename used for substring matching
    #[must_use]
    pub fn match_key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.url {
            Some(url) => write!(f, "{} ({url})", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_builder() {
        let c = Candidate::new("EOY_FS_Mass_12_30_7am.png").with_url("https://example.com/f/1");
        assert_eq!(c.name, "EOY_FS_Mass_12_30_7am.png");
        assert_eq!(c.url.as_deref(), Some("https://example.com/f/1"));
        assert_eq!(c.match_key(), "eoy_fs_mass_12_30_7am.png");
    }

    #[test]
    fn test_candidate_display() {
        assert_eq!(Candidate::new("a.png").to_string(), "a.png");
        assert_eq!(
            Candidate::new("a.png").with_url("u").to_string(),
            "a.png (u)"
        );
    }

    #[test]
    fn test_candidate_deserialize_without_url() {
        let c: Candidate = serde_json::from_str(r#"{"name":"x.png"}"#).unwrap();
        assert_eq!(c, Candidate::new("x.png"));
        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("url"));
    }
}
