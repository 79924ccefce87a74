use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Exoplanets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exoplanets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Exoplanets::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Exoplanets::ImageUrl).string())
                    .col(ColumnDef::new(Exoplanets::Distance).float())
                    .col(ColumnDef::new(Exoplanets::Temperature).float())
                    .col(ColumnDef::new(Exoplanets::YearDiscovered).integer())
                    .col(ColumnDef::new(Exoplanets::Radius).float())
                    .col(ColumnDef::new(Exoplanets::Mass).float())
                    .col(ColumnDef::new(Exoplanets::SemiMajorAxis).float())
                    .col(ColumnDef::new(Exoplanets::Eccentricity).float())
                    .col(ColumnDef::new(Exoplanets::OrbitalPeriodDays).float())
                    .col(ColumnDef::new(Exoplanets::OrbitalPeriodYears).float())
                    .col(
                        ColumnDef::new(Exoplanets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Exoplanets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // The summary listing filters on temperature most often.
        manager
            .create_index(
                Index::create()
                    .table(Exoplanets::Table)
                    .col(Exoplanets::Temperature)
                    .name("idx_exoplanets_temperature")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Exoplanets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Exoplanets {
    Table,
    Id,
    Name,
    ImageUrl,
    Distance,
    Temperature,
    YearDiscovered,
    Radius,
    Mass,
    SemiMajorAxis,
    Eccentricity,
    OrbitalPeriodDays,
    OrbitalPeriodYears,
    CreatedAt,
    UpdatedAt,
}
