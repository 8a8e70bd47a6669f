mod profile;
mod rules;

pub use profile::{
    gap_years, EnglishTest, StudentProfile, GAP_THREE_PLUS, HIGH_SCHOOL_QUALIFICATION, NO_GAP,
};
pub use rules::{RuleFailure, WAIVER_MIN_PERCENTAGE};

use crate::catalog::UniversityCriteria;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// More matches than this counts as fully eligible.
pub const FULL_ELIGIBILITY_THRESHOLD: usize = 5;

/// Headline derived from how many universities matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    PartiallyEligible,
    NotEligible,
}

impl EligibilityStatus {
    pub const fn from_count(count: usize) -> Self {
        if count > FULL_ELIGIBILITY_THRESHOLD {
            Self::Eligible
        } else if count > 0 {
            Self::PartiallyEligible
        } else {
            Self::NotEligible
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Eligible => "Eligible!",
            Self::PartiallyEligible => "Partially Eligible",
            Self::NotEligible => "Not Eligible",
        }
    }
}

/// Matching universities in catalog order plus the derived headline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub universities: Vec<UniversityCriteria>,
    pub status: EligibilityStatus,
}

impl EvaluationResult {
    pub fn new(universities: Vec<UniversityCriteria>) -> Self {
        let status = EligibilityStatus::from_count(universities.len());
        Self {
            universities,
            status,
        }
    }

    pub fn len(&self) -> usize {
        self.universities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universities.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "We found {} universities matching your profile.",
            self.universities.len()
        )
    }
}

/// Filters `catalog` down to the universities `profile` qualifies for.
///
/// Pure: the same profile and catalog always produce the same ordered result,
/// and an empty catalog simply yields no matches.
pub fn evaluate(profile: &StudentProfile, catalog: &[UniversityCriteria]) -> EvaluationResult {
    let target = profile.target_level();
    let universities: Vec<UniversityCriteria> = catalog
        .iter()
        .filter(|candidate| rules::check_candidate(profile, &target, candidate).is_ok())
        .cloned()
        .collect();

    let result = EvaluationResult::new(universities);
    debug!(
        target_level = %target,
        candidates = catalog.len(),
        matches = result.len(),
        status = result.status.label(),
        "evaluated student profile"
    );
    result
}

/// Why `candidate` would be excluded for `profile`, if it would be.
pub fn explain(profile: &StudentProfile, candidate: &UniversityCriteria) -> Result<(), RuleFailure> {
    rules::check_candidate(profile, &profile.target_level(), candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_boundaries() {
        assert_eq!(EligibilityStatus::from_count(0), EligibilityStatus::NotEligible);
        assert_eq!(
            EligibilityStatus::from_count(1),
            EligibilityStatus::PartiallyEligible
        );
        assert_eq!(
            EligibilityStatus::from_count(5),
            EligibilityStatus::PartiallyEligible
        );
        assert_eq!(EligibilityStatus::from_count(6), EligibilityStatus::Eligible);
    }

    #[test]
    fn status_labels_match_results_headline() {
        assert_eq!(EligibilityStatus::Eligible.label(), "Eligible!");
        assert_eq!(
            EligibilityStatus::PartiallyEligible.label(),
            "Partially Eligible"
        );
        assert_eq!(EligibilityStatus::NotEligible.label(), "Not Eligible");
    }

    #[test]
    fn empty_catalog_yields_not_eligible() {
        let result = evaluate(&StudentProfile::default(), &[]);
        assert!(result.is_empty());
        assert_eq!(result.status, EligibilityStatus::NotEligible);
        assert_eq!(
            result.summary(),
            "We found 0 universities matching your profile."
        );
    }
}
