use study_eligibility::catalog::{Catalog, StudyLevel, Tier, UniversityCriteria};
use study_eligibility::eligibility::{
    evaluate, explain, EligibilityStatus, EnglishTest, RuleFailure, StudentProfile,
};

fn high_school_profile() -> StudentProfile {
    StudentProfile {
        qualification: "+2 / High School".to_string(),
        percentage: 70.0,
        gap: "No gap".to_string(),
        english_type: Some(EnglishTest::Ielts),
        ielts_score: 7.0,
        ..StudentProfile::default()
    }
}

fn university_a() -> UniversityCriteria {
    UniversityCriteria {
        name: "A".to_string(),
        study_level: StudyLevel::Undergraduate,
        min_percentage: 60.0,
        min_ielts: 6.5,
        max_gap: 1,
        tier: Tier::Top,
        ..UniversityCriteria::with_defaults("A")
    }
}

fn names(profile: &StudentProfile, catalog: &[UniversityCriteria]) -> Vec<String> {
    evaluate(profile, catalog)
        .universities
        .into_iter()
        .map(|university| university.name)
        .collect()
}

#[test]
fn ielts_profile_meeting_thresholds_is_included() {
    assert_eq!(names(&high_school_profile(), &[university_a()]), vec!["A"]);
}

#[test]
fn ielts_score_below_minimum_is_excluded() {
    let mut profile = high_school_profile();
    profile.ielts_score = 6.0;

    assert!(names(&profile, &[university_a()]).is_empty());
    assert_eq!(
        explain(&profile, &university_a()),
        Err(RuleFailure::EnglishScore {
            test: EnglishTest::Ielts,
            required: 6.5,
            actual: 6.0,
        })
    );
}

#[test]
fn waiver_path_depends_on_university_acceptance() {
    let mut profile = high_school_profile();
    profile.english_type = Some(EnglishTest::Waiver);
    profile.ielts_score = 0.0;
    profile.waiver_percentage = 70.0;

    let mut accepting = university_a();
    accepting.waiver_accepted = true;
    assert_eq!(names(&profile, &[accepting]), vec!["A"]);

    let mut refusing = university_a();
    refusing.waiver_accepted = false;
    profile.waiver_percentage = 100.0;
    assert!(names(&profile, &[refusing]).is_empty());
}

#[test]
fn three_plus_year_gap_against_max_gap() {
    let mut profile = high_school_profile();
    profile.gap = "3+ years".to_string();

    let mut strict = university_a();
    strict.max_gap = 2;
    assert!(names(&profile, &[strict]).is_empty());

    let mut lenient = university_a();
    lenient.max_gap = 3;
    assert_eq!(names(&profile, &[lenient]), vec!["A"]);
}

#[test]
fn each_rule_excludes_on_its_own() {
    let profile = high_school_profile();
    let baseline = university_a();
    assert_eq!(explain(&profile, &baseline), Ok(()));

    let mut wrong_level = profile.clone();
    wrong_level.qualification = "Bachelor's Degree".to_string();
    assert!(matches!(
        explain(&wrong_level, &baseline),
        Err(RuleFailure::StudyLevel { .. })
    ));

    let mut low_percentage = profile.clone();
    low_percentage.percentage = 59.9;
    assert!(matches!(
        explain(&low_percentage, &baseline),
        Err(RuleFailure::Percentage { .. })
    ));

    let mut low_english = profile.clone();
    low_english.ielts_score = 6.4;
    assert!(matches!(
        explain(&low_english, &baseline),
        Err(RuleFailure::EnglishScore { .. })
    ));

    let mut long_gap = profile.clone();
    long_gap.gap = "2".to_string();
    assert!(matches!(
        explain(&long_gap, &baseline),
        Err(RuleFailure::Gap {
            allowed: 1,
            actual: Some(2)
        })
    ));
}

#[test]
fn unrecognized_study_level_never_matches() {
    let mut diploma = university_a();
    diploma.study_level = StudyLevel::Other("Diploma".to_string());

    assert!(names(&high_school_profile(), &[diploma.clone()]).is_empty());

    let mut graduate = high_school_profile();
    graduate.qualification = "Bachelor's Degree".to_string();
    assert!(names(&graduate, &[diploma]).is_empty());
}

#[test]
fn results_keep_catalog_order_and_are_deterministic() {
    let csv = "name,level,pct,ielts,pte,det,waiver,gap,tier\n\
Zeta College,UG,50,6,50,105,no,2,Mid\n\
Graduate School,PG,50,6,50,105,no,2,Top\n\
Alpha University,UG,65,6.5,50,105,yes,1,Top\n\
Strict Institute,UG,90,8,80,140,no,0,Top\n\
Beta Polytechnic,UG,,,,,,,\n";
    let catalog = Catalog::parse("inline", csv);
    let profile = high_school_profile();

    let first = evaluate(&profile, catalog.universities());
    let second = evaluate(&profile, catalog.universities());

    assert_eq!(first, second);
    let names: Vec<_> = first
        .universities
        .iter()
        .map(|university| university.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Zeta College", "Alpha University", "Beta Polytechnic"]
    );
    assert_eq!(first.status, EligibilityStatus::PartiallyEligible);
}

#[test]
fn status_follows_match_count() {
    let profile = high_school_profile();
    let catalog: Vec<UniversityCriteria> = (1..=6)
        .map(|index| UniversityCriteria {
            name: format!("University {index}"),
            ..university_a()
        })
        .collect();

    let five = evaluate(&profile, &catalog[..5]);
    assert_eq!(five.len(), 5);
    assert_eq!(five.status, EligibilityStatus::PartiallyEligible);
    assert_eq!(five.status.label(), "Partially Eligible");

    let six = evaluate(&profile, &catalog);
    assert_eq!(six.len(), 6);
    assert_eq!(six.status, EligibilityStatus::Eligible);
    assert_eq!(six.status.label(), "Eligible!");

    let mut nobody = profile.clone();
    nobody.percentage = 0.0;
    let none = evaluate(&nobody, &catalog);
    assert!(none.is_empty());
    assert_eq!(none.status.label(), "Not Eligible");
}
