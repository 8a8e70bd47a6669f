//! Letter grade conversions used to pre-fill academic and waiver percentages.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "D+")]
    DPlus,
    D,
    E,
}

impl LetterGrade {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::APlus,
            Self::A,
            Self::BPlus,
            Self::B,
            Self::CPlus,
            Self::C,
            Self::DPlus,
            Self::D,
            Self::E,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::E => "E",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|grade| grade.label().eq_ignore_ascii_case(raw))
    }

    pub const fn percentage(self) -> f64 {
        match self {
            Self::APlus => 95.0,
            Self::A => 85.0,
            Self::BPlus => 75.0,
            Self::B => 65.0,
            Self::CPlus => 55.0,
            Self::C => 45.0,
            Self::DPlus => 35.0,
            Self::D => 25.0,
            Self::E => 10.0,
        }
    }

    pub const fn gpa(self) -> f64 {
        match self {
            Self::APlus => 4.0,
            Self::A => 3.6,
            Self::BPlus => 3.2,
            Self::B => 2.8,
            Self::CPlus => 2.4,
            Self::C => 2.0,
            Self::DPlus => 1.6,
            Self::D => 1.2,
            Self::E => 0.8,
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Four-point GPA for a percentage, capped at 4 and rounded to two decimals.
pub fn gpa_from_percentage(percentage: f64) -> f64 {
    ((percentage / 25.0).min(4.0) * 100.0).round() / 100.0
}
