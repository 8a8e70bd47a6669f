use super::profile::{EnglishTest, StudentProfile};
use crate::catalog::{StudyLevel, UniversityCriteria};

/// Fixed bar for the English waiver path; the sheet has no column for it.
pub const WAIVER_MIN_PERCENTAGE: f64 = 65.0;

/// First rule a candidate failed.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleFailure {
    StudyLevel {
        offered: StudyLevel,
        target: StudyLevel,
    },
    Percentage {
        required: f64,
        actual: f64,
    },
    EnglishScore {
        test: EnglishTest,
        required: f64,
        actual: f64,
    },
    WaiverNotAccepted,
    WaiverPercentage {
        required: f64,
        actual: f64,
    },
    MissingEnglishTest,
    Gap {
        allowed: i64,
        actual: Option<i64>,
    },
}

impl RuleFailure {
    pub fn summary(&self) -> String {
        match self {
            RuleFailure::StudyLevel { offered, target } => {
                format!("offers {offered} study, profile targets {target}")
            }
            RuleFailure::Percentage { required, actual } => {
                format!("academic percentage {actual} below minimum {required}")
            }
            RuleFailure::EnglishScore {
                test,
                required,
                actual,
            } => format!("{test} score {actual} below minimum {required}"),
            RuleFailure::WaiverNotAccepted => "does not accept English waivers".to_string(),
            RuleFailure::WaiverPercentage { required, actual } => {
                format!("waiver percentage {actual} below required {required}")
            }
            RuleFailure::MissingEnglishTest => "no English proficiency test selected".to_string(),
            RuleFailure::Gap {
                allowed,
                actual: Some(years),
            } => format!("study gap of {years} year(s) exceeds allowed {allowed}"),
            RuleFailure::Gap { actual: None, .. } => {
                "study gap answer could not be read as a number of years".to_string()
            }
        }
    }
}

/// Applies the rules in order; the first failure excludes the candidate.
pub(crate) fn check_candidate(
    profile: &StudentProfile,
    target: &StudyLevel,
    candidate: &UniversityCriteria,
) -> Result<(), RuleFailure> {
    study_level(target, candidate)?;
    percentage(profile, candidate)?;
    english_proficiency(profile, candidate)?;
    gap(profile, candidate)
}

fn study_level(target: &StudyLevel, candidate: &UniversityCriteria) -> Result<(), RuleFailure> {
    if &candidate.study_level == target {
        Ok(())
    } else {
        Err(RuleFailure::StudyLevel {
            offered: candidate.study_level.clone(),
            target: target.clone(),
        })
    }
}

fn percentage(profile: &StudentProfile, candidate: &UniversityCriteria) -> Result<(), RuleFailure> {
    if profile.percentage >= candidate.min_percentage {
        Ok(())
    } else {
        Err(RuleFailure::Percentage {
            required: candidate.min_percentage,
            actual: profile.percentage,
        })
    }
}

fn english_proficiency(
    profile: &StudentProfile,
    candidate: &UniversityCriteria,
) -> Result<(), RuleFailure> {
    let (test, actual, required) = match profile.english_type {
        None => return Err(RuleFailure::MissingEnglishTest),
        Some(EnglishTest::Waiver) => return waiver(profile, candidate),
        Some(test @ EnglishTest::Ielts) => (test, profile.ielts_score, candidate.min_ielts),
        Some(test @ EnglishTest::Pte) => (test, profile.pte_score, candidate.min_pte),
        Some(test @ EnglishTest::Duolingo) => {
            (test, profile.duolingo_score, candidate.min_duolingo)
        }
    };

    if actual >= required {
        Ok(())
    } else {
        Err(RuleFailure::EnglishScore {
            test,
            required,
            actual,
        })
    }
}

fn waiver(profile: &StudentProfile, candidate: &UniversityCriteria) -> Result<(), RuleFailure> {
    if !candidate.waiver_accepted {
        return Err(RuleFailure::WaiverNotAccepted);
    }
    if profile.waiver_percentage >= WAIVER_MIN_PERCENTAGE {
        Ok(())
    } else {
        Err(RuleFailure::WaiverPercentage {
            required: WAIVER_MIN_PERCENTAGE,
            actual: profile.waiver_percentage,
        })
    }
}

/// An unreadable gap answer fails the rule.
fn gap(profile: &StudentProfile, candidate: &UniversityCriteria) -> Result<(), RuleFailure> {
    match profile.gap_years() {
        Some(years) if years <= candidate.max_gap => Ok(()),
        actual => Err(RuleFailure::Gap {
            allowed: candidate.max_gap,
            actual,
        }),
    }
}
