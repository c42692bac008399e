use sea_orm_migration::{prelude::*, schema::*};

use super::m20260902_000005_create_business_table::Business;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(pk_auto(Service::Id))
                    .col(integer(Service::BusinessId))
                    .col(string(Service::Name))
                    .col(text_null(Service::Description))
                    .col(string(Service::Category))
                    .col(double(Service::Price))
                    .col(integer(Service::DurationMinutes))
                    .col(json(Service::Availability))
                    .col(json(Service::Requirements))
                    .col(integer(Service::MaxPets).default(1))
                    .col(boolean(Service::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Service::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Service::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_business_id")
                            .from(Service::Table, Service::BusinessId)
                            .to(Business::Table, Business::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Service::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Service {
    Table,
    Id,
    BusinessId,
    Name,
    Description,
    Category,
    Price,
    DurationMinutes,
    Availability,
    Requirements,
    MaxPets,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
