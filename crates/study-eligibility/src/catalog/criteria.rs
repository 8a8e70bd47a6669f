use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MIN_PERCENTAGE: f64 = 55.0;
pub const DEFAULT_MIN_IELTS: f64 = 6.0;
pub const DEFAULT_MIN_PTE: f64 = 50.0;
pub const DEFAULT_MIN_DUOLINGO: f64 = 105.0;
pub const DEFAULT_MAX_GAP: i64 = 2;

/// Level of study a university row admits for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StudyLevel {
    Undergraduate,
    Postgraduate,
    /// Label the sheet used that is neither `UG` nor `PG`. Never matches a student.
    Other(String),
}

impl StudyLevel {
    /// Empty cells default to undergraduate.
    pub fn from_label(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("UG") {
            Self::Undergraduate
        } else if trimmed.eq_ignore_ascii_case("PG") {
            Self::Postgraduate
        } else {
            Self::Other(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Undergraduate => "UG",
            Self::Postgraduate => "PG",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for StudyLevel {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<StudyLevel> for String {
    fn from(value: StudyLevel) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for StudyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display-only ranking badge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tier {
    Top,
    #[default]
    Mid,
    Other(String),
}

impl Tier {
    /// Empty cells default to `Mid`.
    pub fn from_label(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("Mid") {
            Self::Mid
        } else if trimmed.eq_ignore_ascii_case("Top") {
            Self::Top
        } else {
            Self::Other(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Top => "Top",
            Self::Mid => "Mid",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Tier {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<Tier> for String {
    fn from(value: Tier) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Admission thresholds for one university, one per catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityCriteria {
    pub name: String,
    pub study_level: StudyLevel,
    pub min_percentage: f64,
    pub min_ielts: f64,
    pub min_pte: f64,
    pub min_duolingo: f64,
    pub waiver_accepted: bool,
    pub max_gap: i64,
    pub tier: Tier,
}

impl UniversityCriteria {
    /// Row with every threshold at its sheet default.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            study_level: StudyLevel::Undergraduate,
            min_percentage: DEFAULT_MIN_PERCENTAGE,
            min_ielts: DEFAULT_MIN_IELTS,
            min_pte: DEFAULT_MIN_PTE,
            min_duolingo: DEFAULT_MIN_DUOLINGO,
            waiver_accepted: false,
            max_gap: DEFAULT_MAX_GAP,
            tier: Tier::Mid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn study_level_labels_are_case_insensitive() {
        assert_eq!(StudyLevel::from_label("ug"), StudyLevel::Undergraduate);
        assert_eq!(StudyLevel::from_label(" PG "), StudyLevel::Postgraduate);
        assert_eq!(StudyLevel::from_label(""), StudyLevel::Undergraduate);
        assert_eq!(
            StudyLevel::from_label("Diploma"),
            StudyLevel::Other("Diploma".to_string())
        );
    }

    #[test]
    fn tier_keeps_unknown_labels() {
        assert_eq!(Tier::from_label("top"), Tier::Top);
        assert_eq!(Tier::from_label(""), Tier::Mid);
        assert_eq!(Tier::from_label("Russell").label(), "Russell");
    }

    #[test]
    fn criteria_serialize_with_sheet_labels() {
        let mut criteria = UniversityCriteria::with_defaults("Northfield University");
        criteria.study_level = StudyLevel::Postgraduate;
        criteria.tier = Tier::Top;

        let value = serde_json::to_value(&criteria).expect("serializes");
        assert_eq!(value["study_level"], "PG");
        assert_eq!(value["tier"], "Top");

        let round: UniversityCriteria = serde_json::from_value(value).expect("deserializes");
        assert_eq!(round, criteria);
    }
}
