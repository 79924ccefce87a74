use sea_orm::entity::prelude::*;

/// Favorite relation between a user and an exoplanet.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_favorites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub exoplanet_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::exoplanets::Entity",
        from = "Column::ExoplanetId",
        to = "super::exoplanets::Column::Id"
    )]
    Exoplanet,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::exoplanets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exoplanet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
