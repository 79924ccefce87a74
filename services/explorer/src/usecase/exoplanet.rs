use exo_domain::enrich::Enrichment;
use exo_domain::exoplanet::{ExoplanetFilter, ExoplanetSortBy};
use exo_domain::pagination::{Page, PageRequest};

use crate::domain::repository::ExoplanetRepository;
use crate::domain::types::{Exoplanet, ExoplanetSummary, NewExoplanet};
use crate::error::ExplorerServiceError;

// ── GetExoplanetSummaries ────────────────────────────────────────────────────

pub struct GetExoplanetSummariesUseCase<R: ExoplanetRepository> {
    pub repo: R,
}

impl<R: ExoplanetRepository> GetExoplanetSummariesUseCase<R> {
    pub async fn execute(
        &self,
        filter: &ExoplanetFilter,
        sort_by: ExoplanetSortBy,
        page: PageRequest,
    ) -> Result<Page<ExoplanetSummary>, ExplorerServiceError> {
        let (exoplanets, total) = self.repo.list(filter, sort_by, page).await?;
        let items = exoplanets
            .into_iter()
            .map(|e| ExoplanetSummary {
                id: e.id,
                name: e.name,
                image_url: e.image_url,
            })
            .collect();
        Ok(Page::new(items, total, page))
    }
}

// ── GetAllExoplanets ─────────────────────────────────────────────────────────

pub struct GetAllExoplanetsUseCase<R: ExoplanetRepository> {
    pub repo: R,
}

impl<R: ExoplanetRepository> GetAllExoplanetsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Exoplanet>, ExplorerServiceError> {
        self.repo.list_all().await
    }
}

// ── GetExoplanet ─────────────────────────────────────────────────────────────

pub struct GetExoplanetUseCase<R: ExoplanetRepository> {
    pub repo: R,
}

impl<R: ExoplanetRepository> GetExoplanetUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Exoplanet, ExplorerServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ExplorerServiceError::ExoplanetNotFound)
    }
}

// ── GetExoplanetDetails ──────────────────────────────────────────────────────

pub struct GetExoplanetDetailsUseCase<R: ExoplanetRepository> {
    pub repo: R,
    pub speed_fraction: f32,
}

impl<R: ExoplanetRepository> GetExoplanetDetailsUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
    ) -> Result<(Exoplanet, Enrichment), ExplorerServiceError> {
        let exo = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ExplorerServiceError::ExoplanetNotFound)?;
        let enrichment = Enrichment::compute(exo.physical_profile(), self.speed_fraction);
        Ok((exo, enrichment))
    }
}

// ── GetHabitableExoplanets ───────────────────────────────────────────────────

pub struct GetHabitableExoplanetsUseCase<R: ExoplanetRepository> {
    pub repo: R,
    pub speed_fraction: f32,
}

impl<R: ExoplanetRepository> GetHabitableExoplanetsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<(Exoplanet, Enrichment)>, ExplorerServiceError> {
        let exoplanets = self.repo.list_habitable().await?;
        Ok(exoplanets
            .into_iter()
            .map(|e| {
                let enrichment = Enrichment::compute(e.physical_profile(), self.speed_fraction);
                (e, enrichment)
            })
            .collect())
    }
}

// ── CreateExoplanet ──────────────────────────────────────────────────────────

pub struct CreateExoplanetUseCase<R: ExoplanetRepository> {
    pub repo: R,
}

impl<R: ExoplanetRepository> CreateExoplanetUseCase<R> {
    pub async fn execute(&self, exo: NewExoplanet) -> Result<Exoplanet, ExplorerServiceError> {
        if exo.name.trim().is_empty() {
            return Err(ExplorerServiceError::MissingData);
        }
        let created = self.repo.create(&exo).await?;
        tracing::info!(name = %created.name, "exoplanet created");
        Ok(created)
    }
}

// ── UpdateExoplanet ──────────────────────────────────────────────────────────

pub struct UpdateExoplanetUseCase<R: ExoplanetRepository> {
    pub repo: R,
}

impl<R: ExoplanetRepository> UpdateExoplanetUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        exo: NewExoplanet,
    ) -> Result<Exoplanet, ExplorerServiceError> {
        if exo.name.trim().is_empty() {
            return Err(ExplorerServiceError::MissingData);
        }
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ExplorerServiceError::ExoplanetNotFound)?;
        let updated = self.repo.update(id, &exo).await?;
        tracing::info!(name = %updated.name, "exoplanet updated");
        Ok(updated)
    }
}

// ── DeleteExoplanet ──────────────────────────────────────────────────────────

pub struct DeleteExoplanetUseCase<R: ExoplanetRepository> {
    pub repo: R,
}

impl<R: ExoplanetRepository> DeleteExoplanetUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), ExplorerServiceError> {
        let deleted = self.repo.delete(id).await?;
        if !deleted {
            return Err(ExplorerServiceError::ExoplanetNotFound);
        }
        tracing::info!(id, "exoplanet deleted");
        Ok(())
    }
}
