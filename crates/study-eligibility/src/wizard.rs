//! Step-by-step profile collection in front of the evaluator.
//!
//! The wizard owns the raw answers exactly as typed, gates each step on its own
//! validation, and only hands a coerced [`StudentProfile`] to
//! [`eligibility::evaluate`] when the last step is submitted.

use crate::catalog::{leading_number, UniversityCriteria};
use crate::eligibility::{self, EnglishTest, EvaluationResult, StudentProfile};
use crate::grades::{gpa_from_percentage, LetterGrade};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Qualification,
    Academics,
    EnglishProficiency,
    Results,
}

impl WizardStep {
    pub const fn number(self) -> u8 {
        match self {
            Self::Qualification => 1,
            Self::Academics => 2,
            Self::EnglishProficiency => 3,
            Self::Results => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Qualification => "Qualification",
            Self::Academics => "Academics",
            Self::EnglishProficiency => "English Proficiency",
            Self::Results => "Results",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepValidationError {
    #[error("Please select your Highest Qualification.")]
    MissingQualification,
    #[error("Please enter your Academic Percentage.")]
    MissingPercentage,
    #[error("the profile can only be submitted from the English proficiency step, not {step}")]
    NotReadyToSubmit { step: WizardStep },
}

/// Raw form answers. Fields stay strings until submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub qualification: String,
    pub percentage: String,
    pub gpa: String,
    pub gap: String,
    pub english_type: String,
    pub ielts_score: String,
    pub pte_score: String,
    pub duolingo_score: String,
    pub waiver_percentage: String,
}

impl ProfileForm {
    /// Typing a percentage keeps the GPA field in sync when the value reads as a number.
    pub fn set_percentage(&mut self, raw: impl Into<String>) {
        self.percentage = raw.into();
        if let Some(value) = leading_number(&self.percentage) {
            self.gpa = format!("{:.2}", gpa_from_percentage(value));
        }
    }

    pub fn select_academic_grade(&mut self, grade: LetterGrade) {
        self.percentage = grade.percentage().to_string();
        self.gpa = grade.gpa().to_string();
    }

    pub fn select_english_grade(&mut self, grade: LetterGrade) {
        self.waiver_percentage = grade.percentage().to_string();
    }

    pub fn select_english_test(&mut self, test: EnglishTest) {
        self.english_type = test.label().to_string();
    }

    /// Coerces the answers; unreadable numbers become `0`.
    pub fn to_profile(&self) -> StudentProfile {
        let number = |raw: &str| leading_number(raw).unwrap_or(0.0);
        StudentProfile {
            qualification: self.qualification.trim().to_string(),
            percentage: number(&self.percentage),
            gap: self.gap.trim().to_string(),
            english_type: EnglishTest::from_label(&self.english_type),
            ielts_score: number(&self.ielts_score),
            pte_score: number(&self.pte_score),
            duolingo_score: number(&self.duolingo_score),
            waiver_percentage: number(&self.waiver_percentage),
        }
    }

    fn validate_step(&self, step: WizardStep) -> Result<(), StepValidationError> {
        match step {
            WizardStep::Qualification if self.qualification.trim().is_empty() => {
                Err(StepValidationError::MissingQualification)
            }
            WizardStep::Academics if leading_number(&self.percentage).is_none() => {
                Err(StepValidationError::MissingPercentage)
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    form: ProfileForm,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Qualification,
            form: ProfileForm::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    /// Advances one step once the current step validates. Stays put on the last input step.
    pub fn advance(&mut self) -> Result<WizardStep, StepValidationError> {
        self.form.validate_step(self.step)?;
        self.step = match self.step {
            WizardStep::Qualification => WizardStep::Academics,
            WizardStep::Academics => WizardStep::EnglishProficiency,
            other => other,
        };
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::Academics => WizardStep::Qualification,
            WizardStep::EnglishProficiency => WizardStep::Academics,
            other => other,
        };
        self.step
    }

    /// Evaluates the collected profile against `catalog` and moves to the results.
    pub fn submit(
        &mut self,
        catalog: &[UniversityCriteria],
    ) -> Result<EvaluationResult, StepValidationError> {
        if self.step != WizardStep::EnglishProficiency {
            return Err(StepValidationError::NotReadyToSubmit { step: self.step });
        }
        self.form.validate_step(WizardStep::Qualification)?;
        self.form.validate_step(WizardStep::Academics)?;

        let result = eligibility::evaluate(&self.form.to_profile(), catalog);
        self.step = WizardStep::Results;
        Ok(result)
    }

    pub fn restart(&mut self) {
        *self = Self::new();
    }
}
