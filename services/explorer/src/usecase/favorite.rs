use serde_json::json;
use uuid::Uuid;

use crate::domain::repository::{
    ExoplanetRepository, FavoriteRepository, OutboxRepository, UserRepository,
};
use crate::domain::types::{Exoplanet, OutboxEvent, event_kind};
use crate::error::ExplorerServiceError;

// ── GetFavorites ─────────────────────────────────────────────────────────────

pub struct GetFavoritesUseCase<U, F>
where
    U: UserRepository,
    F: FavoriteRepository,
{
    pub users: U,
    pub favorites: F,
}

impl<U, F> GetFavoritesUseCase<U, F>
where
    U: UserRepository,
    F: FavoriteRepository,
{
    pub async fn execute(&self, email: &str) -> Result<Vec<Exoplanet>, ExplorerServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ExplorerServiceError::UserNotFound)?;
        self.favorites.list(user.id).await
    }
}

// ── ToggleFavorite ───────────────────────────────────────────────────────────

pub struct ToggleFavoriteUseCase<U, E, F, O>
where
    U: UserRepository,
    E: ExoplanetRepository,
    F: FavoriteRepository,
    O: OutboxRepository,
{
    pub users: U,
    pub exoplanets: E,
    pub favorites: F,
    pub outbox: O,
}

impl<U, E, F, O> ToggleFavoriteUseCase<U, E, F, O>
where
    U: UserRepository,
    E: ExoplanetRepository,
    F: FavoriteRepository,
    O: OutboxRepository,
{
    /// Flip the favorite relation. Returns `true` when the exoplanet was
    /// added, `false` when it was removed.
    pub async fn execute(
        &self,
        email: &str,
        exoplanet_id: i32,
    ) -> Result<bool, ExplorerServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ExplorerServiceError::UserNotFound)?;

        let exo = self
            .exoplanets
            .find_by_id(exoplanet_id)
            .await?
            .ok_or(ExplorerServiceError::ExoplanetNotFound)?;

        let adding = !self.favorites.contains(user.id, exo.id).await?;
        let kind = if adding {
            self.favorites.add(user.id, exo.id).await?;
            event_kind::FAVORITE_ADDED
        } else {
            self.favorites.remove(user.id, exo.id).await?;
            event_kind::FAVORITE_REMOVED
        };

        emit(&self.outbox, kind, user.id, exo.id, &exo.name).await;
        tracing::info!(
            email = %user.email,
            exoplanet = %exo.name,
            action = if adding { "added" } else { "removed" },
            "favorite toggled"
        );
        Ok(adding)
    }
}

/// Fire-and-forget outbox append; failures are logged, never propagated.
async fn emit<O: OutboxRepository>(
    outbox: &O,
    kind: &str,
    user_id: Uuid,
    exoplanet_id: i32,
    exoplanet_name: &str,
) {
    let event = OutboxEvent {
        id: Uuid::new_v4(),
        kind: kind.to_owned(),
        payload: json!({ "exoplanet_id": exoplanet_id, "exoplanet_name": exoplanet_name }),
        idempotency_key: format!("{kind}:{user_id}:{exoplanet_id}:{}", Uuid::new_v4()),
    };
    if let Err(e) = outbox.append(&event).await {
        tracing::warn!(error = %e, kind, "failed to record favorite event");
    }
}
