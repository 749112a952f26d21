use serde::{Deserialize, Serialize};

/// Lowercase audience codes recognized as audience tokens in reference lines
pub const AUDIENCE_VOCABULARY: [&str; 6] = [
    "mass",
    "monthly",
    "leadership",
    "masshp",
    "leadershiphp",
    "major",
];

/// Known email audience
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Mass,
    Monthly,
    Leadership,
    MassHp,
    LeadershipHp,
    Major,
}

impl Audience {
    /// Parse an audience code, case-insensitively.
    ///
    /// Accepts the vocabulary plus the underscored spellings `mass_hp` and
    /// `leadership_hp`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mass" => Some(Audience::Mass),
            "monthly" => Some(Audience::Monthly),
            "leadership" => Some(Audience::Leadership),
            "masshp" | "mass_hp" => Some(Audience::MassHp),
            "leadershiphp" | "leadership_hp" => Some(Audience::LeadershipHp),
            "major" => Some(Audience::Major),
            _ => None,
        }
    }

    /// Canonical display form, e.g. `MassHP`
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mass => "Mass",
            Self::Monthly => "Monthly",
            Self::Leadership => "Leadership",
            Self::MassHp => "MassHP",
            Self::LeadershipHp => "LeadershipHP",
            Self::Major => "Major",
        }
    }
}

/// Classification of a match result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Exactly one candidate passed every enforced attribute
    Single,
    /// No candidate passed
    None,
    /// Two or more candidates passed; needs manual resolution
    Multiple,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::None => write!(f, "none"),
            Self::Multiple => write!(f, "multiple"),
        }
    }
}
