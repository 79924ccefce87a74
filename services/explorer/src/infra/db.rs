use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use exo_domain::enrich::{HABITABLE_MAX_K, HABITABLE_MIN_K};
use exo_domain::exoplanet::{ExoplanetFilter, ExoplanetSortBy};
use exo_domain::pagination::{PageRequest, Sort};
use exo_explorer_schema::{backup_codes, exoplanets, outbox_events, user_favorites, users};

use crate::domain::repository::{
    BackupCodeRepository, ExoplanetRepository, FavoriteRepository, OutboxRepository,
    UserRepository,
};
use crate::domain::types::{BackupCode, Exoplanet, NewExoplanet, OutboxEvent, User};
use crate::error::ExplorerServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ExplorerServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ExplorerServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            otp_code_hash: Set(user.otp_code_hash.clone()),
            otp_expires_at: Set(user.otp_expires_at),
            otp_verified: Set(user.otp_verified),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            language: Set(user.language.clone()),
            dark_mode: Set(user.dark_mode),
            is_admin: Set(user.is_admin),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn store_otp(
        &self,
        user_id: Uuid,
        otp_hash: &str,
        expires_at: DateTime<Utc>,
        event: &OutboxEvent,
    ) -> Result<(), ExplorerServiceError> {
        let otp_hash = otp_hash.to_owned();
        let event = event.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    users::ActiveModel {
                        id: Set(user_id),
                        otp_code_hash: Set(Some(otp_hash)),
                        otp_expires_at: Set(Some(expires_at)),
                        otp_verified: Set(false),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("store OTP with outbox event")?;
        Ok(())
    }

    async fn confirm_otp(&self, user_id: Uuid) -> Result<(), ExplorerServiceError> {
        users::ActiveModel {
            id: Set(user_id),
            otp_code_hash: Set(None),
            otp_expires_at: Set(None),
            otp_verified: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("confirm OTP")?;
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), ExplorerServiceError> {
        let mut am = users::ActiveModel {
            id: Set(user_id),
            ..Default::default()
        };
        if let Some(name) = first_name {
            am.first_name = Set(Some(name.to_owned()));
        }
        if let Some(name) = last_name {
            am.last_name = Set(Some(name.to_owned()));
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update user profile")?;
        Ok(())
    }

    async fn update_preferences(
        &self,
        user_id: Uuid,
        dark_mode: Option<bool>,
        language: Option<&str>,
    ) -> Result<(), ExplorerServiceError> {
        let mut am = users::ActiveModel {
            id: Set(user_id),
            ..Default::default()
        };
        if let Some(dark) = dark_mode {
            am.dark_mode = Set(dark);
        }
        if let Some(lang) = language {
            am.language = Set(lang.to_owned());
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db)
            .await
            .context("update user preferences")?;
        Ok(())
    }

    async fn update_password_hash(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), ExplorerServiceError> {
        users::ActiveModel {
            id: Set(user_id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update password hash")?;
        Ok(())
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, ExplorerServiceError> {
        let result = users::Entity::delete_many()
            .filter(users::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .context("delete user by email")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_all(&self) -> Result<(), ExplorerServiceError> {
        users::Entity::delete_many()
            .exec(&self.db)
            .await
            .context("delete all users")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        otp_code_hash: model.otp_code_hash,
        otp_expires_at: model.otp_expires_at,
        otp_verified: model.otp_verified,
        first_name: model.first_name,
        last_name: model.last_name,
        language: model.language,
        dark_mode: model.dark_mode,
        is_admin: model.is_admin,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Exoplanet repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbExoplanetRepository {
    pub db: DatabaseConnection,
}

impl ExoplanetRepository for DbExoplanetRepository {
    async fn list(
        &self,
        filter: &ExoplanetFilter,
        sort_by: ExoplanetSortBy,
        page: PageRequest,
    ) -> Result<(Vec<Exoplanet>, u64), ExplorerServiceError> {
        let PageRequest { per_page, page } = page.clamped();

        let mut query = exoplanets::Entity::find();
        if let Some(ref name) = filter.name {
            if !name.is_empty() {
                query = query.filter(
                    Expr::expr(Func::lower(Expr::col(exoplanets::Column::Name)))
                        .like(format!("%{}%", name.to_lowercase())),
                );
            }
        }
        if let Some(min) = filter.min_temp {
            query = query.filter(exoplanets::Column::Temperature.gte(min));
        }
        if let Some(max) = filter.max_temp {
            query = query.filter(exoplanets::Column::Temperature.lte(max));
        }
        if let Some(min) = filter.min_distance {
            query = query.filter(exoplanets::Column::Distance.gte(min));
        }
        if let Some(max) = filter.max_distance {
            query = query.filter(exoplanets::Column::Distance.lte(max));
        }
        if let Some(min) = filter.min_year {
            query = query.filter(exoplanets::Column::YearDiscovered.gte(min));
        }
        if let Some(max) = filter.max_year {
            query = query.filter(exoplanets::Column::YearDiscovered.lte(max));
        }

        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count exoplanets")?;

        let (column, sort) = match sort_by {
            ExoplanetSortBy::Id(s) => (exoplanets::Column::Id, s),
            ExoplanetSortBy::Name(s) => (exoplanets::Column::Name, s),
            ExoplanetSortBy::Distance(s) => (exoplanets::Column::Distance, s),
            ExoplanetSortBy::Temperature(s) => (exoplanets::Column::Temperature, s),
            ExoplanetSortBy::YearDiscovered(s) => (exoplanets::Column::YearDiscovered, s),
        };
        query = match sort {
            Sort::Desc => query.order_by_desc(column),
            Sort::Asc => query.order_by_asc(column),
        };

        let models = query
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list exoplanets")?;
        Ok((
            models.into_iter().map(exoplanet_from_model).collect(),
            total,
        ))
    }

    async fn list_all(&self) -> Result<Vec<Exoplanet>, ExplorerServiceError> {
        let models = exoplanets::Entity::find()
            .order_by_asc(exoplanets::Column::Id)
            .all(&self.db)
            .await
            .context("list all exoplanets")?;
        Ok(models.into_iter().map(exoplanet_from_model).collect())
    }

    async fn list_habitable(&self) -> Result<Vec<Exoplanet>, ExplorerServiceError> {
        let models = exoplanets::Entity::find()
            .filter(exoplanets::Column::Temperature.between(HABITABLE_MIN_K, HABITABLE_MAX_K))
            .order_by_asc(exoplanets::Column::Id)
            .all(&self.db)
            .await
            .context("list habitable exoplanets")?;
        Ok(models.into_iter().map(exoplanet_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Exoplanet>, ExplorerServiceError> {
        let model = exoplanets::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find exoplanet by id")?;
        Ok(model.map(exoplanet_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Exoplanet>, ExplorerServiceError> {
        let model = exoplanets::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(exoplanets::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .one(&self.db)
            .await
            .context("find exoplanet by name")?;
        Ok(model.map(exoplanet_from_model))
    }

    async fn create(&self, exo: &NewExoplanet) -> Result<Exoplanet, ExplorerServiceError> {
        let now = Utc::now();
        let result = exoplanets::ActiveModel {
            id: NotSet,
            name: Set(exo.name.clone()),
            image_url: Set(exo.image_url.clone()),
            distance: Set(exo.distance),
            temperature: Set(exo.temperature),
            year_discovered: Set(exo.year_discovered),
            radius: Set(exo.radius),
            mass: Set(exo.mass),
            semi_major_axis: Set(exo.semi_major_axis),
            eccentricity: Set(exo.eccentricity),
            orbital_period_days: Set(exo.orbital_period_days),
            orbital_period_years: Set(exo.orbital_period_years),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(exoplanet_from_model(model)),
            Err(e) => Err(map_unique_violation(e, "create exoplanet")),
        }
    }

    async fn update(
        &self,
        id: i32,
        exo: &NewExoplanet,
    ) -> Result<Exoplanet, ExplorerServiceError> {
        let result = exoplanets::ActiveModel {
            id: Set(id),
            name: Set(exo.name.clone()),
            image_url: Set(exo.image_url.clone()),
            distance: Set(exo.distance),
            temperature: Set(exo.temperature),
            year_discovered: Set(exo.year_discovered),
            radius: Set(exo.radius),
            mass: Set(exo.mass),
            semi_major_axis: Set(exo.semi_major_axis),
            eccentricity: Set(exo.eccentricity),
            orbital_period_days: Set(exo.orbital_period_days),
            orbital_period_years: Set(exo.orbital_period_years),
            created_at: NotSet,
            updated_at: Set(Utc::now()),
        }
        .update(&self.db)
        .await;
        match result {
            Ok(model) => Ok(exoplanet_from_model(model)),
            Err(e) => Err(map_unique_violation(e, "update exoplanet")),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, ExplorerServiceError> {
        let result = exoplanets::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete exoplanet")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_all(&self) -> Result<(), ExplorerServiceError> {
        exoplanets::Entity::delete_many()
            .exec(&self.db)
            .await
            .context("delete all exoplanets")?;
        Ok(())
    }
}

/// The `name` column carries a unique constraint; surface violations as a
/// 409 instead of a 500.
fn map_unique_violation(err: sea_orm::DbErr, context: &'static str) -> ExplorerServiceError {
    match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
            ExplorerServiceError::DuplicateExoplanet
        }
        _ => ExplorerServiceError::Internal(anyhow::Error::new(err).context(context)),
    }
}

fn exoplanet_from_model(model: exoplanets::Model) -> Exoplanet {
    Exoplanet {
        id: model.id,
        name: model.name,
        image_url: model.image_url,
        distance: model.distance,
        temperature: model.temperature,
        year_discovered: model.year_discovered,
        radius: model.radius,
        mass: model.mass,
        semi_major_axis: model.semi_major_axis,
        eccentricity: model.eccentricity,
        orbital_period_days: model.orbital_period_days,
        orbital_period_years: model.orbital_period_years,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Favorite repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFavoriteRepository {
    pub db: DatabaseConnection,
}

impl FavoriteRepository for DbFavoriteRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Exoplanet>, ExplorerServiceError> {
        let favorites = user_favorites::Entity::find()
            .filter(user_favorites::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .context("list favorites")?;
        let ids: Vec<i32> = favorites.iter().map(|f| f.exoplanet_id).collect();
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = exoplanets::Entity::find()
            .filter(exoplanets::Column::Id.is_in(ids))
            .order_by_asc(exoplanets::Column::Id)
            .all(&self.db)
            .await
            .context("load favorite exoplanets")?;
        Ok(models.into_iter().map(exoplanet_from_model).collect())
    }

    async fn contains(
        &self,
        user_id: Uuid,
        exoplanet_id: i32,
    ) -> Result<bool, ExplorerServiceError> {
        let model = user_favorites::Entity::find_by_id((user_id, exoplanet_id))
            .one(&self.db)
            .await
            .context("check favorite")?;
        Ok(model.is_some())
    }

    async fn add(&self, user_id: Uuid, exoplanet_id: i32) -> Result<(), ExplorerServiceError> {
        user_favorites::ActiveModel {
            user_id: Set(user_id),
            exoplanet_id: Set(exoplanet_id),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("add favorite")?;
        Ok(())
    }

    async fn remove(
        &self,
        user_id: Uuid,
        exoplanet_id: i32,
    ) -> Result<bool, ExplorerServiceError> {
        let result = user_favorites::Entity::delete_many()
            .filter(user_favorites::Column::UserId.eq(user_id))
            .filter(user_favorites::Column::ExoplanetId.eq(exoplanet_id))
            .exec(&self.db)
            .await
            .context("remove favorite")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Backup code repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBackupCodeRepository {
    pub db: DatabaseConnection,
}

impl BackupCodeRepository for DbBackupCodeRepository {
    async fn replace_for_user(
        &self,
        user_id: Uuid,
        codes: &[BackupCode],
    ) -> Result<(), ExplorerServiceError> {
        let codes = codes.to_vec();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    backup_codes::Entity::delete_many()
                        .filter(backup_codes::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;
                    if codes.is_empty() {
                        return Ok(());
                    }
                    let models = codes.iter().map(|code| backup_codes::ActiveModel {
                        id: Set(code.id),
                        user_id: Set(code.user_id),
                        code_hash: Set(code.code_hash.clone()),
                        used: Set(code.used),
                        created_at: Set(code.created_at),
                    });
                    backup_codes::Entity::insert_many(models).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .context("replace backup codes")?;
        Ok(())
    }

    async fn list_unused(&self, user_id: Uuid) -> Result<Vec<BackupCode>, ExplorerServiceError> {
        let models = backup_codes::Entity::find()
            .filter(backup_codes::Column::UserId.eq(user_id))
            .filter(backup_codes::Column::Used.eq(false))
            .all(&self.db)
            .await
            .context("list unused backup codes")?;
        Ok(models.into_iter().map(backup_code_from_model).collect())
    }

    async fn counts(&self, user_id: Uuid) -> Result<(u64, u64), ExplorerServiceError> {
        let total = backup_codes::Entity::find()
            .filter(backup_codes::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .context("count backup codes")?;
        let used = backup_codes::Entity::find()
            .filter(backup_codes::Column::UserId.eq(user_id))
            .filter(backup_codes::Column::Used.eq(true))
            .count(&self.db)
            .await
            .context("count used backup codes")?;
        Ok((total, used))
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), ExplorerServiceError> {
        backup_codes::ActiveModel {
            id: Set(id),
            used: Set(true),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark backup code used")?;
        Ok(())
    }
}

fn backup_code_from_model(model: backup_codes::Model) -> BackupCode {
    BackupCode {
        id: model.id,
        user_id: model.user_id,
        code_hash: model.code_hash,
        used: model.used,
        created_at: model.created_at,
    }
}

// ── Outbox repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOutboxRepository {
    pub db: DatabaseConnection,
}

impl OutboxRepository for DbOutboxRepository {
    async fn append(&self, event: &OutboxEvent) -> Result<(), ExplorerServiceError> {
        insert_outbox_event(&self.db, event)
            .await
            .context("append outbox event")?;
        Ok(())
    }
}

async fn insert_outbox_event<C: sea_orm::ConnectionTrait>(
    conn: &C,
    event: &OutboxEvent,
) -> Result<(), sea_orm::DbErr> {
    let now = Utc::now();
    outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(now),
        next_attempt_at: Set(now),
        processed_at: Set(None),
        failed_at: Set(None),
    }
    .insert(conn)
    .await?;
    Ok(())
}
