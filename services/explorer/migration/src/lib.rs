use sea_orm_migration::prelude::*;

mod m20260401_000001_create_users;
mod m20260401_000002_create_exoplanets;
mod m20260401_000003_create_user_favorites;
mod m20260401_000004_create_backup_codes;
mod m20260401_000005_create_outbox_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_users::Migration),
            Box::new(m20260401_000002_create_exoplanets::Migration),
            Box::new(m20260401_000003_create_user_favorites::Migration),
            Box::new(m20260401_000004_create_backup_codes::Migration),
            Box::new(m20260401_000005_create_outbox_events::Migration),
        ]
    }
}
