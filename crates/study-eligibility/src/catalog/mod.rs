//! University admission catalog: ingestion from the published sheet and snapshot storage.

mod criteria;
mod fields;
mod parser;
mod store;

pub use criteria::{
    StudyLevel, Tier, UniversityCriteria, DEFAULT_MAX_GAP, DEFAULT_MIN_DUOLINGO,
    DEFAULT_MIN_IELTS, DEFAULT_MIN_PERCENTAGE, DEFAULT_MIN_PTE,
};
pub use store::CatalogStore;

pub(crate) use fields::{leading_integer, leading_number};

use crate::config::CatalogConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("catalog source {url} responded with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("catalog response exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// One immutable load of the sheet.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    source: String,
    loaded_at: DateTime<Utc>,
    universities: Vec<UniversityCriteria>,
}

impl Catalog {
    pub fn new(source: impl Into<String>, universities: Vec<UniversityCriteria>) -> Self {
        Self {
            source: source.into(),
            loaded_at: Utc::now(),
            universities,
        }
    }

    pub fn empty() -> Self {
        Self::new(String::new(), Vec::new())
    }

    /// Parses a sheet body that is already in memory.
    pub fn parse(source: impl Into<String>, text: &str) -> Self {
        Self::new(source, parser::parse_catalog(text))
    }

    pub fn from_reader<R: Read>(
        mut reader: R,
        source: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let mut body = Vec::new();
        reader.read_to_end(&mut body)?;
        Ok(Self::parse(source, &String::from_utf8_lossy(&body)))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file, path.display().to_string())?;
        info!(
            source = %catalog.source,
            universities = catalog.len(),
            "loaded university catalog from file"
        );
        Ok(catalog)
    }

    pub fn universities(&self) -> &[UniversityCriteria] {
        &self.universities
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.universities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universities.is_empty()
    }
}

/// Fetches the published sheet over HTTP(S). One request per `load`, never retried.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    client: reqwest::Client,
    max_bytes: usize,
}

impl CatalogLoader {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("study-eligibility/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(CatalogError::Network)?;

        Ok(Self {
            client,
            max_bytes: config.max_bytes,
        })
    }

    pub async fn load(&self, source_url: &str) -> Result<Catalog, CatalogError> {
        let mut response = self
            .client
            .get(source_url)
            .send()
            .await
            .map_err(CatalogError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: source_url.to_string(),
                status: status.as_u16(),
            });
        }

        let limit = self.max_bytes;
        if response
            .content_length()
            .is_some_and(|length| length > limit as u64)
        {
            return Err(CatalogError::TooLarge { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(CatalogError::Network)? {
            if body.len() + chunk.len() > limit {
                return Err(CatalogError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        let catalog = Catalog::parse(source_url, &String::from_utf8_lossy(&body));
        info!(
            source = %source_url,
            bytes = body.len(),
            universities = catalog.len(),
            "loaded university catalog"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn from_reader_parses_sheet() {
        let csv = "name,level,pct,ielts,pte,det,waiver,gap,tier\nNorthfield,UG,60,6.5,50,105,yes,1,Top\n";
        let catalog = Catalog::from_reader(Cursor::new(csv), "inline").expect("catalog reads");
        assert_eq!(catalog.source(), "inline");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.universities()[0].name, "Northfield");
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = Catalog::from_path("./does-not-exist.csv").expect_err("expected io error");
        match error {
            CatalogError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn empty_catalog_has_no_rows() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.source(), "");
    }
}
