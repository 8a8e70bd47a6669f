use clap::Args;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use study_eligibility::catalog::{Catalog, CatalogLoader, CatalogStore, UniversityCriteria};
use study_eligibility::config::CatalogConfig;
use study_eligibility::eligibility::{EligibilityStatus, EnglishTest, EvaluationResult};
use study_eligibility::error::AppError;
use study_eligibility::grades::LetterGrade;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<CatalogStore>,
    pub(crate) loader: Arc<CatalogLoader>,
    pub(crate) catalog_url: Arc<str>,
}

/// Where a one-shot CLI command reads the catalog from.
#[derive(Args, Debug, Default)]
pub(crate) struct CatalogSourceArgs {
    /// Published CSV URL (defaults to CATALOG_URL)
    #[arg(long, conflicts_with = "file")]
    pub(crate) url: Option<String>,
    /// Local CSV export instead of the published sheet
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
}

pub(crate) async fn load_catalog(
    source: CatalogSourceArgs,
    config: &CatalogConfig,
) -> Result<Catalog, AppError> {
    let catalog = match source.file {
        Some(path) => Catalog::from_path(path)?,
        None => {
            let url = source.url.unwrap_or_else(|| config.url.clone());
            CatalogLoader::new(config)?.load(&url).await?
        }
    };
    Ok(catalog)
}

/// JSON shape shared by `POST /api/v1/eligibility` and `evaluate --json`.
#[derive(Debug, Serialize)]
pub(crate) struct EligibilityView {
    pub(crate) status: EligibilityStatus,
    pub(crate) status_label: &'static str,
    pub(crate) summary: String,
    pub(crate) universities: Vec<UniversityCriteria>,
}

impl From<EvaluationResult> for EligibilityView {
    fn from(result: EvaluationResult) -> Self {
        Self {
            status: result.status,
            status_label: result.status.label(),
            summary: result.summary(),
            universities: result.universities,
        }
    }
}

pub(crate) fn parse_english_test(raw: &str) -> Result<EnglishTest, String> {
    EnglishTest::ordered()
        .into_iter()
        .find(|test| test.label().eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| format!("'{raw}' is not one of IELTS, PTE, Duolingo, Waiver"))
}

pub(crate) fn parse_grade(raw: &str) -> Result<LetterGrade, String> {
    LetterGrade::from_label(raw).ok_or_else(|| format!("'{raw}' is not a letter grade (A+ to E)"))
}
