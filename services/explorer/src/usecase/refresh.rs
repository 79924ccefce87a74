use crate::domain::repository::{ExoplanetCatalogPort, ExoplanetRepository, ImageLookup};
use crate::domain::types::{CatalogEntry, Exoplanet, NewExoplanet};
use crate::error::ExplorerServiceError;

/// Counts reported by a refresh run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub created: u64,
    pub updated: u64,
}

pub struct RefreshExoplanetDataUseCase<R, C, I>
where
    R: ExoplanetRepository,
    C: ExoplanetCatalogPort,
    I: ImageLookup,
{
    pub repo: R,
    pub catalog: C,
    pub images: I,
}

impl<R, C, I> RefreshExoplanetDataUseCase<R, C, I>
where
    R: ExoplanetRepository,
    C: ExoplanetCatalogPort,
    I: ImageLookup,
{
    /// Upsert the external catalog by case-insensitive name. A bad row must
    /// not abort the whole run, so per-entry failures are logged and skipped.
    pub async fn execute(&self) -> Result<RefreshOutcome, ExplorerServiceError> {
        tracing::info!("starting exoplanet data refresh");
        let entries = self.catalog.fetch().await?;

        let mut outcome = RefreshOutcome::default();
        for entry in entries {
            let result = match self.repo.find_by_name(&entry.name).await {
                Ok(Some(existing)) => {
                    let merged = merge_entry(&existing, &entry);
                    self.repo.update(existing.id, &merged).await.map(|_| {
                        outcome.updated += 1;
                    })
                }
                Ok(None) => {
                    let fresh = new_from_entry(&entry, self.images.url_for(&entry.name));
                    self.repo.create(&fresh).await.map(|_| {
                        outcome.created += 1;
                    })
                }
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                tracing::warn!(name = %entry.name, error = %e, "failed to process catalog entry");
            }
        }

        tracing::info!(
            updated = outcome.updated,
            created = outcome.created,
            "exoplanet data refresh completed"
        );
        Ok(outcome)
    }
}

/// Archive values overwrite the physical fields; curated fields (image, year
/// discovered, orbital shape) are kept.
fn merge_entry(existing: &Exoplanet, entry: &CatalogEntry) -> NewExoplanet {
    NewExoplanet {
        name: existing.name.clone(),
        image_url: existing.image_url.clone(),
        year_discovered: existing.year_discovered,
        semi_major_axis: existing.semi_major_axis,
        eccentricity: existing.eccentricity,
        radius: entry.radius,
        mass: entry.mass,
        distance: entry.distance,
        temperature: entry.temperature,
        orbital_period_days: entry.orbital_period_days,
        orbital_period_years: entry.orbital_period_days.map(|d| d / 365.0),
    }
}

fn new_from_entry(entry: &CatalogEntry, image_url: Option<String>) -> NewExoplanet {
    NewExoplanet {
        name: entry.name.clone(),
        image_url,
        radius: entry.radius,
        mass: entry.mass,
        distance: entry.distance,
        temperature: entry.temperature,
        orbital_period_days: entry.orbital_period_days,
        orbital_period_years: entry.orbital_period_days.map(|d| d / 365.0),
        ..Default::default()
    }
}
