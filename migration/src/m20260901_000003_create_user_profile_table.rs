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
                    .table(UserProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(UserProfile::Id))
                    .col(integer_uniq(UserProfile::UserId))
                    .col(text_null(UserProfile::Bio))
                    .col(date_null(UserProfile::DateOfBirth))
                    .col(string_null(UserProfile::Street))
                    .col(string_null(UserProfile::City))
                    .col(string_null(UserProfile::State))
                    .col(string_null(UserProfile::ZipCode))
                    .col(string_null(UserProfile::Country))
                    .col(string_null(UserProfile::EmergencyContactName))
                    .col(string_null(UserProfile::EmergencyContactPhone))
                    .col(boolean(UserProfile::EmailNotifications).default(true))
                    .col(boolean(UserProfile::SmsNotifications).default(false))
                    .col(boolean(UserProfile::PushNotifications).default(true))
                    .col(string(UserProfile::PreferredLanguage).default("en"))
                    .col(string_null(UserProfile::ProfilePicturePath))
                    .col(
                        timestamp_with_time_zone(UserProfile::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(UserProfile::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_profile_user_id")
                            .from(UserProfile::Table, UserProfile::UserId)
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
            .drop_table(Table::drop().table(UserProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserProfile {
    Table,
    Id,
    UserId,
    Bio,
    DateOfBirth,
    Street,
    City,
    State,
    ZipCode,
    Country,
    EmergencyContactName,
    EmergencyContactPhone,
    EmailNotifications,
    SmsNotifications,
    PushNotifications,
    PreferredLanguage,
    ProfilePicturePath,
    CreatedAt,
    UpdatedAt,
}
