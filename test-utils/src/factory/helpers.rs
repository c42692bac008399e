//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a business owner, an active business and one active service.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((owner, business, service))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_service_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::business::Model,
        entity::service::Model,
    ),
    DbErr,
> {
    let owner = crate::factory::user::create_user_with_role(db, "business_owner").await?;
    let business = crate::factory::business::create_business(db, owner.id).await?;
    let service = crate::factory::offering::create_offering(db, business.id).await?;

    Ok((owner, business, service))
}

/// Creates everything a booking needs: a pet owner with a pet, and a service.
///
/// # Returns
/// - `Ok((pet_owner, pet, business_owner, business, service))`
/// - `Err(DbErr)` - Database error during creation
pub async fn create_booking_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::pet::Model,
        entity::user::Model,
        entity::business::Model,
        entity::service::Model,
    ),
    DbErr,
> {
    let pet_owner = crate::factory::user::create_user(db).await?;
    let pet = crate::factory::pet::create_pet(db, pet_owner.id).await?;
    let (business_owner, business, service) = create_service_with_dependencies(db).await?;

    Ok((pet_owner, pet, business_owner, business, service))
}
