use crate::catalog::{leading_integer, StudyLevel};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The only qualification that targets undergraduate programmes.
pub const HIGH_SCHOOL_QUALIFICATION: &str = "+2 / High School";

pub const NO_GAP: &str = "No gap";
pub const GAP_THREE_PLUS: &str = "3+ years";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnglishTest {
    #[serde(rename = "IELTS")]
    Ielts,
    #[serde(rename = "PTE")]
    Pte,
    Duolingo,
    Waiver,
}

impl EnglishTest {
    pub const fn ordered() -> [Self; 4] {
        [Self::Ielts, Self::Pte, Self::Duolingo, Self::Waiver]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ielts => "IELTS",
            Self::Pte => "PTE",
            Self::Duolingo => "Duolingo",
            Self::Waiver => "Waiver",
        }
    }

    /// Form labels match exactly; anything else means no test was chosen.
    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|test| test.label() == raw)
    }
}

impl fmt::Display for EnglishTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Student answers as collected by the form layer.
///
/// Numeric fields are already coerced (unparsable input arrives as `0`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub gap: String,
    #[serde(default, deserialize_with = "english_test_or_none")]
    pub english_type: Option<EnglishTest>,
    #[serde(default)]
    pub ielts_score: f64,
    #[serde(default)]
    pub pte_score: f64,
    #[serde(default)]
    pub duolingo_score: f64,
    #[serde(default)]
    pub waiver_percentage: f64,
}

impl StudentProfile {
    pub fn target_level(&self) -> StudyLevel {
        if self.qualification == HIGH_SCHOOL_QUALIFICATION {
            StudyLevel::Undergraduate
        } else {
            StudyLevel::Postgraduate
        }
    }

    pub fn gap_years(&self) -> Option<i64> {
        gap_years(&self.gap)
    }

    /// Score reported for the selected test, or `None` for waivers and missing tests.
    pub fn english_score(&self) -> Option<f64> {
        match self.english_type? {
            EnglishTest::Ielts => Some(self.ielts_score),
            EnglishTest::Pte => Some(self.pte_score),
            EnglishTest::Duolingo => Some(self.duolingo_score),
            EnglishTest::Waiver => None,
        }
    }
}

/// Years out of study for a gap answer. `None` when the answer carries no number.
pub fn gap_years(gap: &str) -> Option<i64> {
    match gap.trim() {
        NO_GAP => Some(0),
        GAP_THREE_PLUS => Some(3),
        other => leading_integer(other),
    }
}

fn english_test_or_none<'de, D>(deserializer: D) -> Result<Option<EnglishTest>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.as_deref().and_then(EnglishTest::from_label))
}
