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
                    .table(Address::Table)
                    .if_not_exists()
                    .col(pk_auto(Address::Id))
                    .col(integer(Address::UserId))
                    .col(string(Address::Label))
                    .col(string_null(Address::CustomLabel))
                    .col(string(Address::Street))
                    .col(string(Address::City))
                    .col(string(Address::State))
                    .col(string(Address::ZipCode))
                    .col(string(Address::Country))
                    .col(double_null(Address::Latitude))
                    .col(double_null(Address::Longitude))
                    .col(text_null(Address::Instructions))
                    .col(boolean(Address::IsDefault).default(false))
                    .col(
                        timestamp_with_time_zone(Address::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Address::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_address_user_id")
                            .from(Address::Table, Address::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Address::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Address {
    Table,
    Id,
    UserId,
    Label,
    CustomLabel,
    Street,
    City,
    State,
    ZipCode,
    Country,
    Latitude,
    Longitude,
    Instructions,
    IsDefault,
    CreatedAt,
    UpdatedAt,
}
