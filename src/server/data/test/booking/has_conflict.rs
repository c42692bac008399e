use super::*;

/// Tests detecting a held slot.
///
/// Verifies that a pending booking at the same service and exact time conflicts.
///
/// Expected: Ok(true)
#[tokio::test]
async fn detects_pending_booking_at_same_time() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, _, business, service) = create_booking_dependencies(db).await?;
    let slot = (Utc::now() + Duration::days(3))
        .duration_trunc(Duration::hours(1))
        .unwrap();
    BookingFactory::new(db, owner.id, pet.id, business.id, service.id)
        .appointment(slot)
        .build()
        .await?;

    let repo = BookingRepository::new(db);

    assert!(repo.has_conflict(service.id, slot).await?);

    Ok(())
}

/// Tests that released slots do not conflict.
///
/// Verifies that cancelled and completed bookings free the slot, and that other
/// times or services never conflict.
///
/// Expected: Ok(false) for every query
#[tokio::test]
async fn ignores_released_slots_and_other_times() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, _, business, service) = create_booking_dependencies(db).await?;
    let other_service = factory::create_offering(db, business.id).await?;
    let slot = (Utc::now() + Duration::days(3))
        .duration_trunc(Duration::hours(1))
        .unwrap();
    for status in ["cancelled", "completed"] {
        BookingFactory::new(db, owner.id, pet.id, business.id, service.id)
            .appointment(slot)
            .status(status)
            .build()
            .await?;
    }
    BookingFactory::new(db, owner.id, pet.id, business.id, other_service.id)
        .appointment(slot + Duration::hours(1))
        .build()
        .await?;

    let repo = BookingRepository::new(db);

    assert!(!repo.has_conflict(service.id, slot).await?);
    assert!(!repo.has_conflict(service.id, slot + Duration::hours(1)).await?);
    assert!(!repo.has_conflict(other_service.id, slot).await?);

    Ok(())
}
