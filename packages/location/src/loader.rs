//! One-shot loading of the static location dataset.
//!
//! The dataset is a single JSON document (`location.json`) mapping
//! location keys to records. It is read once per component lifetime,
//! either over HTTP or from a local file. Callers that render pickers use
//! [`load_locations`], which never fails: a broken dataset leaves the
//! pickers empty.

use std::fmt;
use std::path::PathBuf;

use risk_prevalence_location_models::LocationTable;

use crate::LocationError;

/// Where to read the dataset from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Fetched with a single unauthenticated GET.
    Url(String),
    /// Read from the local filesystem.
    Path(PathBuf),
}

impl DatasetSource {
    /// Interprets `http://` and `https://` strings as URLs and anything
    /// else as a file path.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Self::Url(s.to_string())
        } else {
            Self::Path(PathBuf::from(s))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads and parses the dataset.
///
/// # Errors
///
/// Returns [`LocationError`] if the request or file read fails, the server
/// answers with an error status, or the body is not a location mapping.
pub async fn fetch_locations(source: &DatasetSource) -> Result<LocationTable, LocationError> {
    let body = match source {
        DatasetSource::Url(url) => {
            let client = reqwest::Client::new();
            client
                .get(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?
        }
        DatasetSource::Path(path) => tokio::fs::read_to_string(path).await?,
    };

    let table: LocationTable = serde_json::from_str(&body)?;

    for (parent, child) in table.dangling_subdivisions() {
        log::warn!("Location {parent} lists unknown subdivision {child}");
    }

    Ok(table)
}

/// Loads the dataset, falling back to an empty table on any failure.
///
/// There is no retry; the failure is only logged.
pub async fn load_locations(source: &DatasetSource) -> LocationTable {
    match fetch_locations(source).await {
        Ok(table) => {
            log::info!("Loaded {} locations from {source}", table.len());
            table
        }
        Err(e) => {
            log::warn!("Failed to load locations from {source}: {e}");
            LocationTable::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_kind() {
        assert_eq!(
            DatasetSource::parse("https://example.org/location.json"),
            DatasetSource::Url("https://example.org/location.json".into())
        );
        assert_eq!(
            DatasetSource::parse("data/location.json"),
            DatasetSource::Path(PathBuf::from("data/location.json"))
        );
    }

    #[tokio::test]
    async fn loads_from_file() {
        let tmp = std::env::temp_dir().join("risk_prevalence_loader_ok.json");
        std::fs::write(
            &tmp,
            r#"{"France": {"label": "France", "iso3": "FRA", "population": "67,000,000",
                "casesPastWeek": 1000, "casesIncreasingPercentage": 3.0,
                "positiveCasePercentage": null, "topLevelGroup": "Countries",
                "subdivisions": [], "updatedAt": "2021-06-01"}}"#,
        )
        .unwrap();

        let table = fetch_locations(&DatasetSource::Path(tmp.clone()))
            .await
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("France").unwrap().cases_past_week, 1000);

        let _ = std::fs::remove_file(&tmp);
    }

    #[tokio::test]
    async fn broken_dataset_yields_empty_table() {
        let tmp = std::env::temp_dir().join("risk_prevalence_loader_broken.json");
        std::fs::write(&tmp, "[1, 2, 3]").unwrap();

        let source = DatasetSource::Path(tmp.clone());
        assert!(matches!(
            fetch_locations(&source).await,
            Err(LocationError::Json(_))
        ));
        assert!(load_locations(&source).await.is_empty());

        let _ = std::fs::remove_file(&tmp);
    }

    #[tokio::test]
    async fn missing_file_yields_empty_table() {
        let source = DatasetSource::Path(PathBuf::from("/nonexistent/location.json"));
        assert!(load_locations(&source).await.is_empty());
    }

    #[test]
    fn bundled_dataset_is_consistent() {
        let table: LocationTable =
            serde_json::from_str(include_str!("../../../data/location.json")).unwrap();
        assert!(table.dangling_subdivisions().is_empty());
        assert_eq!(table.get("US_13").unwrap().label, "Georgia");
        assert_eq!(
            table.get("Georgia").unwrap().iso3.as_deref(),
            Some("GEO")
        );
    }
}
