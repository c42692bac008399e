use sea_orm_migration::{prelude::*, schema::*};

use super::m20260901_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Business::Table)
                    .if_not_exists()
                    .col(pk_auto(Business::Id))
                    .col(integer(Business::OwnerId))
                    .col(string(Business::Name))
                    .col(text_null(Business::Description))
                    .col(json(Business::Categories))
                    .col(string_null(Business::Email))
                    .col(string_null(Business::Phone))
                    .col(string_null(Business::Website))
                    .col(string(Business::Street))
                    .col(string(Business::City))
                    .col(string(Business::State))
                    .col(string(Business::ZipCode))
                    .col(string(Business::Country))
                    .col(double_null(Business::Latitude))
                    .col(double_null(Business::Longitude))
                    .col(json(Business::BusinessHours))
                    .col(boolean(Business::IsVerified).default(false))
                    .col(boolean(Business::IsActive).default(true))
                    .col(double_null(Business::AverageRating))
                    .col(integer(Business::RatingCount).default(0))
                    .col(
                        timestamp_with_time_zone(Business::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Business::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_business_owner_id")
                            .from(Business::Table, Business::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_business_city")
                    .table(Business::Table)
                    .col(Business::City)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Business::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Business {
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    Categories,
    Email,
    Phone,
    Website,
    Street,
    City,
    State,
    ZipCode,
    Country,
    Latitude,
    Longitude,
    BusinessHours,
    IsVerified,
    IsActive,
    AverageRating,
    RatingCount,
    CreatedAt,
    UpdatedAt,
}
