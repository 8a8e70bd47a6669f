use crate::infra::{load_catalog, parse_english_test, parse_grade, CatalogSourceArgs, EligibilityView};
use clap::Args;
use study_eligibility::catalog::{Catalog, UniversityCriteria};
use study_eligibility::config::AppConfig;
use study_eligibility::eligibility::{explain, EnglishTest, EvaluationResult, StudentProfile};
use study_eligibility::error::AppError;
use study_eligibility::grades::LetterGrade;
use study_eligibility::wizard::Wizard;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    #[command(flatten)]
    pub(crate) source: CatalogSourceArgs,
    /// Print the catalog as JSON instead of a listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct EvaluateArgs {
    #[command(flatten)]
    pub(crate) source: CatalogSourceArgs,
    /// Highest qualification, e.g. "+2 / High School" or "Bachelor's Degree"
    #[arg(long)]
    pub(crate) qualification: String,
    /// Academic percentage
    #[arg(long, conflicts_with = "academic_grade")]
    pub(crate) percentage: Option<String>,
    /// Academic letter grade (A+ to E), converted to a percentage
    #[arg(long, value_parser = parse_grade)]
    pub(crate) academic_grade: Option<LetterGrade>,
    /// Study gap: "No gap", a number of years, or "3+ years"
    #[arg(long, default_value = "No gap")]
    pub(crate) gap: String,
    /// English proficiency route: IELTS, PTE, Duolingo or Waiver
    #[arg(long, value_parser = parse_english_test)]
    pub(crate) english_type: Option<EnglishTest>,
    /// Score for the chosen English test
    #[arg(long)]
    pub(crate) score: Option<String>,
    /// Percentage in English used for the waiver route
    #[arg(long, conflicts_with = "english_grade")]
    pub(crate) waiver_percentage: Option<String>,
    /// English letter grade (A+ to E), converted to the waiver percentage
    #[arg(long, value_parser = parse_grade)]
    pub(crate) english_grade: Option<LetterGrade>,
    /// List excluded universities with the rule that excluded them
    #[arg(long)]
    pub(crate) explain: bool,
    /// Print the result as JSON
    #[arg(long, conflicts_with = "explain")]
    pub(crate) json: bool,
}

pub(crate) async fn run_catalog(args: CatalogArgs, config: &AppConfig) -> Result<(), AppError> {
    let catalog = load_catalog(args.source, &config.catalog).await?;

    if args.json {
        let body = serde_json::to_string_pretty(&catalog).map_err(std::io::Error::from)?;
        println!("{body}");
        return Ok(());
    }

    println!("University catalog");
    render_source(&catalog);
    for university in catalog.universities() {
        println!(
            "- {} | {} | min {}% | IELTS {} | PTE {} | Duolingo {} | waiver {} | max gap {} yrs | {} tier",
            university.name,
            university.study_level,
            university.min_percentage,
            university.min_ielts,
            university.min_pte,
            university.min_duolingo,
            if university.waiver_accepted { "yes" } else { "no" },
            university.max_gap,
            university.tier
        );
    }
    Ok(())
}

pub(crate) async fn run_evaluate(args: EvaluateArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut wizard = profile_wizard(&args)?;
    let catalog = load_catalog(args.source, &config.catalog).await?;
    let profile = wizard.form().to_profile();
    let result = wizard.submit(catalog.universities())?;

    if args.json {
        let view = EligibilityView::from(result);
        let body = serde_json::to_string_pretty(&view).map_err(std::io::Error::from)?;
        println!("{body}");
        return Ok(());
    }

    render_result(&catalog, &profile, &result);
    if args.explain {
        render_exclusions(&profile, catalog.universities());
    }
    Ok(())
}

/// Walks the wizard through its input steps so flags get the same validation as the form.
fn profile_wizard(args: &EvaluateArgs) -> Result<Wizard, AppError> {
    let mut wizard = Wizard::new();

    wizard.form_mut().qualification = args.qualification.clone();
    wizard.advance()?;

    let form = wizard.form_mut();
    match (args.academic_grade, &args.percentage) {
        (Some(grade), _) => form.select_academic_grade(grade),
        (None, Some(percentage)) => form.set_percentage(percentage.as_str()),
        (None, None) => {}
    }
    form.gap = args.gap.clone();
    wizard.advance()?;

    let form = wizard.form_mut();
    if let Some(test) = args.english_type {
        form.select_english_test(test);
        let score = args.score.clone().unwrap_or_default();
        match test {
            EnglishTest::Ielts => form.ielts_score = score,
            EnglishTest::Pte => form.pte_score = score,
            EnglishTest::Duolingo => form.duolingo_score = score,
            EnglishTest::Waiver => {}
        }
    }
    match (args.english_grade, &args.waiver_percentage) {
        (Some(grade), _) => form.select_english_grade(grade),
        (None, Some(percentage)) => form.waiver_percentage = percentage.clone(),
        (None, None) => {}
    }

    Ok(wizard)
}

fn render_source(catalog: &Catalog) {
    println!(
        "Source: {} ({} universities, loaded {})",
        catalog.source(),
        catalog.len(),
        catalog.loaded_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
}

fn describe_english(profile: &StudentProfile) -> String {
    match (profile.english_type, profile.english_score()) {
        (Some(test), Some(score)) => format!("{test} {score}"),
        (Some(test), None) => format!("{test} ({}% in English)", profile.waiver_percentage),
        (None, _) => "not provided".to_string(),
    }
}

fn render_result(catalog: &Catalog, profile: &StudentProfile, result: &EvaluationResult) {
    println!("Eligibility check");
    render_source(catalog);
    println!(
        "Profile: {} ({} study) | {}% | English: {}",
        profile.qualification,
        profile.target_level(),
        profile.percentage,
        describe_english(profile)
    );
    println!("\n{}", result.status.label());
    println!("{}", result.summary());

    for university in &result.universities {
        println!(
            "- {} | {} | Max Gap: {} yrs | {} Tier",
            university.name, university.study_level, university.max_gap, university.tier
        );
    }
}

fn render_exclusions(profile: &StudentProfile, universities: &[UniversityCriteria]) {
    let excluded: Vec<_> = universities
        .iter()
        .filter_map(|university| {
            explain(profile, university)
                .err()
                .map(|failure| (university, failure))
        })
        .collect();

    if excluded.is_empty() {
        println!("\nExcluded universities: none");
        return;
    }

    println!("\nExcluded universities");
    for (university, failure) in excluded {
        println!("- {}: {}", university.name, failure.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> EvaluateArgs {
        EvaluateArgs {
            qualification: "Bachelor's Degree".to_string(),
            percentage: Some("72".to_string()),
            gap: "1".to_string(),
            english_type: Some(EnglishTest::Pte),
            score: Some("61".to_string()),
            ..EvaluateArgs::default()
        }
    }

    #[test]
    fn flags_fill_the_matching_score_field() {
        let wizard = profile_wizard(&args()).expect("flags validate");
        let profile = wizard.form().to_profile();
        assert_eq!(profile.percentage, 72.0);
        assert_eq!(profile.english_type, Some(EnglishTest::Pte));
        assert_eq!(profile.pte_score, 61.0);
        assert_eq!(profile.ielts_score, 0.0);
        assert_eq!(profile.gap, "1");
    }

    #[test]
    fn grades_convert_to_percentages() {
        let args = EvaluateArgs {
            percentage: None,
            academic_grade: Some(LetterGrade::A),
            english_type: Some(EnglishTest::Waiver),
            english_grade: Some(LetterGrade::B),
            ..args()
        };
        let profile = profile_wizard(&args).expect("flags validate").form().to_profile();
        assert_eq!(profile.percentage, 85.0);
        assert_eq!(profile.waiver_percentage, 65.0);
    }

    #[test]
    fn missing_percentage_is_rejected_like_the_form() {
        let args = EvaluateArgs {
            percentage: None,
            ..args()
        };
        let error = profile_wizard(&args).expect_err("percentage required");
        assert!(matches!(error, AppError::Validation(_)));
    }

    #[test]
    fn english_summary_reports_the_selected_route() {
        let profile = profile_wizard(&args()).expect("flags validate").form().to_profile();
        assert_eq!(describe_english(&profile), "PTE 61");

        let waiver = EvaluateArgs {
            english_type: Some(EnglishTest::Waiver),
            waiver_percentage: Some("70".to_string()),
            ..args()
        };
        let profile = profile_wizard(&waiver).expect("flags validate").form().to_profile();
        assert_eq!(describe_english(&profile), "Waiver (70% in English)");

        let untested = EvaluateArgs {
            english_type: None,
            ..args()
        };
        let profile = profile_wizard(&untested).expect("flags validate").form().to_profile();
        assert_eq!(describe_english(&profile), "not provided");
    }

    #[test]
    fn blank_qualification_is_rejected() {
        let args = EvaluateArgs {
            qualification: "  ".to_string(),
            ..args()
        };
        assert!(matches!(
            profile_wizard(&args),
            Err(AppError::Validation(_))
        ));
    }
}
