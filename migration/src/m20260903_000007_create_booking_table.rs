use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260901_000001_create_user_table::User, m20260902_000004_create_pet_table::Pet,
    m20260902_000005_create_business_table::Business,
    m20260902_000006_create_service_table::Service,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::OwnerId))
                    .col(integer(Booking::BusinessId))
                    .col(integer(Booking::ServiceId))
                    .col(integer(Booking::PetId))
                    .col(timestamp_with_time_zone(Booking::AppointmentDateTime))
                    .col(string(Booking::Status))
                    .col(string(Booking::PaymentStatus))
                    .col(double(Booking::TotalPrice))
                    .col(text_null(Booking::Notes))
                    .col(text_null(Booking::CancellationReason))
                    .col(timestamp_with_time_zone_null(Booking::CancelledAt))
                    .col(integer_null(Booking::Rating))
                    .col(text_null(Booking::Review))
                    .col(timestamp_with_time_zone_null(Booking::RatedAt))
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Booking::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_owner_id")
                            .from(Booking::Table, Booking::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_business_id")
                            .from(Booking::Table, Booking::BusinessId)
                            .to(Business::Table, Business::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_service_id")
                            .from(Booking::Table, Booking::ServiceId)
                            .to(Service::Table, Service::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_pet_id")
                            .from(Booking::Table, Booking::PetId)
                            .to(Pet::Table, Pet::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Backs the service/appointment conflict lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_service_appointment")
                    .table(Booking::Table)
                    .col(Booking::ServiceId)
                    .col(Booking::AppointmentDateTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    OwnerId,
    BusinessId,
    ServiceId,
    PetId,
    AppointmentDateTime,
    Status,
    PaymentStatus,
    TotalPrice,
    Notes,
    CancellationReason,
    CancelledAt,
    Rating,
    Review,
    RatedAt,
    CreatedAt,
    UpdatedAt,
}
