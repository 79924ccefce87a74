use sea_orm::entity::prelude::*;

/// Exoplanet record. All physical fields are nullable — the external archive
/// reports incomplete data for most planets.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exoplanets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub image_url: Option<String>,
    pub distance: Option<f32>,
    pub temperature: Option<f32>,
    pub year_discovered: Option<i32>,
    pub radius: Option<f32>,
    pub mass: Option<f32>,
    pub semi_major_axis: Option<f32>,
    pub eccentricity: Option<f32>,
    pub orbital_period_days: Option<f32>,
    pub orbital_period_years: Option<f32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_favorites::Entity")]
    UserFavorites,
}

impl Related<super::user_favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserFavorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
