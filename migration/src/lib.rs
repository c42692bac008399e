pub use sea_orm_migration::prelude::*;

mod m20260901_000001_create_user_table;
mod m20260901_000002_create_refresh_token_table;
mod m20260901_000003_create_user_profile_table;
mod m20260902_000004_create_pet_table;
mod m20260902_000005_create_business_table;
mod m20260902_000006_create_service_table;
mod m20260903_000007_create_booking_table;
mod m20260903_000008_create_address_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_user_table::Migration),
            Box::new(m20260901_000002_create_refresh_token_table::Migration),
            Box::new(m20260901_000003_create_user_profile_table::Migration),
            Box::new(m20260902_000004_create_pet_table::Migration),
            Box::new(m20260902_000005_create_business_table::Migration),
            Box::new(m20260902_000006_create_service_table::Migration),
            Box::new(m20260903_000007_create_booking_table::Migration),
            Box::new(m20260903_000008_create_address_table::Migration),
        ]
    }
}
