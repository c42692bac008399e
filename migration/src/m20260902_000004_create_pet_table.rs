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
                    .table(Pet::Table)
                    .if_not_exists()
                    .col(pk_auto(Pet::Id))
                    .col(integer(Pet::OwnerId))
                    .col(string(Pet::Name))
                    .col(string(Pet::Species))
                    .col(string_null(Pet::Breed))
                    .col(string(Pet::Gender))
                    .col(date_null(Pet::DateOfBirth))
                    .col(double_null(Pet::WeightKg))
                    .col(string_null(Pet::Color))
                    .col(string_null(Pet::MicrochipId))
                    .col(text_null(Pet::SpecialNeeds))
                    .col(json(Pet::MedicalHistory))
                    .col(json(Pet::Vaccinations))
                    .col(boolean(Pet::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Pet::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Pet::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pet_owner_id")
                            .from(Pet::Table, Pet::OwnerId)
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
                    .name("idx_pet_owner_id")
                    .table(Pet::Table)
                    .col(Pet::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pet::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Pet {
    Table,
    Id,
    OwnerId,
    Name,
    Species,
    Breed,
    Gender,
    DateOfBirth,
    WeightKg,
    Color,
    MicrochipId,
    SpecialNeeds,
    MedicalHistory,
    Vaccinations,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
