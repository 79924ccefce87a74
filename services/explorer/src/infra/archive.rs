use std::time::Duration;

use serde::Deserialize;

use crate::domain::repository::ExoplanetCatalogPort;
use crate::domain::types::CatalogEntry;
use crate::error::ExplorerServiceError;

/// TAP aggregate query: one row per planet name, averaged over measurements.
const ARCHIVE_URL: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync?query=SELECT+pl_name,+AVG(pl_rade)+AS+avg_rade,+AVG(pl_bmasse)+AS+avg_mass,+AVG(pl_orbsmax)+AS+avg_dist,+AVG(pl_orbper)+AS+avg_period,+AVG(pl_eqt)+AS+avg_temp+FROM+ps+GROUP+BY+pl_name&format=json";

/// HTTP client for the NASA Exoplanet Archive.
#[derive(Clone)]
pub struct HttpArchiveClient {
    client: reqwest::Client,
}

impl HttpArchiveClient {
    pub fn new() -> anyhow::Result<Self> {
        // The TAP endpoint is slow to stream the full aggregate; generous
        // read timeout, short connect timeout.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self { client })
    }
}

#[derive(Debug, Deserialize)]
struct ArchiveRow {
    pl_name: String,
    avg_rade: Option<f32>,
    avg_mass: Option<f32>,
    avg_dist: Option<f32>,
    avg_period: Option<f32>,
    avg_temp: Option<f32>,
}

impl From<ArchiveRow> for CatalogEntry {
    fn from(row: ArchiveRow) -> Self {
        CatalogEntry {
            name: row.pl_name,
            radius: row.avg_rade,
            mass: row.avg_mass,
            distance: row.avg_dist,
            orbital_period_days: row.avg_period,
            temperature: row.avg_temp,
        }
    }
}

impl ExoplanetCatalogPort for HttpArchiveClient {
    async fn fetch(&self) -> Result<Vec<CatalogEntry>, ExplorerServiceError> {
        tracing::info!("fetching exoplanet data from external archive");
        let response = self.client.get(ARCHIVE_URL).send().await.map_err(|e| {
            tracing::warn!(error = %e, "archive request failed");
            ExplorerServiceError::ArchiveUnavailable
        })?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "archive returned error status");
            return Err(ExplorerServiceError::ArchiveUnavailable);
        }
        let rows: Vec<ArchiveRow> = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "archive response was not valid JSON");
            ExplorerServiceError::ArchiveUnavailable
        })?;
        tracing::info!(count = rows.len(), "fetched exoplanet catalog");
        Ok(rows.into_iter().map(CatalogEntry::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_archive_rows_with_nulls() {
        let json = r#"[
            {"pl_name": "Kepler-442 b", "avg_rade": 1.34, "avg_mass": null,
             "avg_dist": 0.409, "avg_period": 112.3, "avg_temp": 233.0},
            {"pl_name": "TOI-700 d", "avg_rade": null, "avg_mass": null,
             "avg_dist": null, "avg_period": null, "avg_temp": null}
        ]"#;
        let rows: Vec<ArchiveRow> = serde_json::from_str(json).unwrap();
        let entries: Vec<CatalogEntry> = rows.into_iter().map(CatalogEntry::from).collect();
        assert_eq!(entries[0].name, "Kepler-442 b");
        assert_eq!(entries[0].radius, Some(1.34));
        assert_eq!(entries[0].mass, None);
        assert_eq!(entries[1].name, "TOI-700 d");
        assert_eq!(entries[1].temperature, None);
    }
}
